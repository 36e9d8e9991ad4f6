//! Runtime configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::CardiodashError;

pub const BIND_ENV: &str = "CARDIODASH_BIND";
pub const MODEL_PATH_ENV: &str = "CARDIODASH_MODEL_PATH";
pub const DATA_PATH_ENV: &str = "CARDIODASH_DATA_PATH";
pub const STATIC_PATH_ENV: &str = "CARDIODASH_STATIC_PATH";
pub const PROBABILITY_CLASS_ENV: &str = "CARDIODASH_PROBABILITY_CLASS";
pub const REQUIRE_MANIFEST_ENV: &str = "CARDIODASH_REQUIRE_MANIFEST";
pub const LOG_FILE_ENV: &str = "CARDIODASH_LOG_FILE";

/// Class of the model output shown as the disease probability.
pub const DEFAULT_PROBABILITY_CLASS: usize = 2;

/// Startup configuration. Read once, then passed into the services.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind: SocketAddr,
    /// Directory holding `model.json` and optionally `manifest.json`
    pub model_dir: PathBuf,
    /// Directory holding the reference curve tables
    pub data_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Index into the model's class distribution
    pub probability_class: usize,
    /// Refuse to start without a model manifest
    pub require_manifest: bool,
    /// Append logs here instead of stdout
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8888)),
            model_dir: PathBuf::from("models"),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("static"),
            probability_class: DEFAULT_PROBABILITY_CLASS,
            require_manifest: false,
            log_file: None,
        }
    }
}

fn parse_bool(name: &str, v: &str) -> Result<bool, CardiodashError> {
    match v.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        other => Err(CardiodashError::Config(format!("{name}: expected a boolean, got '{other}'"))),
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `CardiodashError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, CardiodashError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for unset names.
    ///
    /// # Errors
    /// Returns `CardiodashError::Config` if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CardiodashError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(BIND_ENV) {
            config.bind = v
                .trim()
                .parse()
                .map_err(|e| CardiodashError::Config(format!("{BIND_ENV}: {e}")))?;
        }
        if let Some(v) = lookup(MODEL_PATH_ENV) {
            config.model_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(DATA_PATH_ENV) {
            config.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(STATIC_PATH_ENV) {
            config.static_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(PROBABILITY_CLASS_ENV) {
            config.probability_class = v
                .trim()
                .parse()
                .map_err(|e| CardiodashError::Config(format!("{PROBABILITY_CLASS_ENV}: {e}")))?;
        }
        if let Some(v) = lookup(REQUIRE_MANIFEST_ENV) {
            config.require_manifest = parse_bool(REQUIRE_MANIFEST_ENV, &v)?;
        }
        if let Some(v) = lookup(LOG_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(v));
        }

        Ok(config)
    }
}
