//! Manifest utility for cardiodash model directories.
//!
//! Writes `manifest.json` binding the model artifact (and any extra files)
//! to their SHA-256 hashes, so the server can detect a swapped or corrupted
//! model at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin write_manifest -- <model_dir> [--include <file>]...
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use cardiodash::adapters::model::{
    sha256_hex, ModelManifest, MANIFEST_FILE, MANIFEST_VERSION, MODEL_FILE,
};
use cardiodash::adapters::SoftmaxModel;

fn usage() -> String {
    "Usage: write_manifest <model_dir> [--include <file>]...".to_string()
}

fn parse_args() -> Result<(PathBuf, Vec<String>)> {
    let mut args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;
    let mut extra = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--include" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!(usage()))?;
                extra.push(v);
            }
            "-h" | "--help" => bail!(usage()),
            _ if model_dir.is_none() => model_dir = Some(PathBuf::from(arg)),
            _ => bail!(usage()),
        }
    }

    let model_dir = model_dir.ok_or_else(|| anyhow::anyhow!(usage()))?;
    Ok((model_dir, extra))
}

fn main() -> Result<()> {
    let (model_dir, extra) = parse_args()?;

    // Refuse to bless an artifact the server would reject.
    let model_path = model_dir.join(MODEL_FILE);
    let model_bytes =
        fs::read(&model_path).with_context(|| format!("Failed to read {model_path:?}"))?;
    let model: SoftmaxModel = serde_json::from_slice(&model_bytes)
        .with_context(|| format!("Invalid model in {model_path:?}"))?;
    model.validate()?;

    let mut files = BTreeMap::new();
    files.insert(MODEL_FILE.to_string(), sha256_hex(&model_bytes));
    for rel in extra {
        let path = model_dir.join(&rel);
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {path:?}"))?;
        files.insert(rel, sha256_hex(&bytes));
    }

    let manifest = ModelManifest {
        version: MANIFEST_VERSION,
        created_at: Some(chrono::Utc::now().timestamp()),
        files,
    };

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;

    println!("Wrote manifest: {manifest_path:?} ({} files)", manifest.files.len());
    Ok(())
}
