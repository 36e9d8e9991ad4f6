//! cardiodash: heart disease probability dashboard
//!
//! Main entry point for the web server.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiodash::web::{self, AppState};
use cardiodash::AppConfig;

/// Writer for the log sink: the append-mode file if one is configured, else stdout.
fn log_writer(log_file: Option<&Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let Some(path) = log_file else {
        return Ok(tracing_appender::non_blocking(std::io::stdout()));
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory {dir:?}"))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {path:?}"))?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. Keep the guard alive until exit so buffered lines flush.
fn init_logging(config: &AppConfig) -> Result<WorkerGuard> {
    let (writer, guard) = log_writer(config.log_file.as_deref())?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();
    Ok(guard)
}

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config)?;

    tracing::info!(bind = %config.bind, class = config.probability_class, "cardiodash starting");

    // No model or curves, no server.
    let state = AppState::from_config(&config).with_context(|| {
        format!(
            "Failed to load artifacts (model: {:?}, data: {:?})",
            config.model_dir, config.data_dir
        )
    })?;

    tokio::runtime::Runtime::new()?.block_on(web::serve(&config, state))?;

    tracing::info!("cardiodash stopped");
    Ok(())
}
