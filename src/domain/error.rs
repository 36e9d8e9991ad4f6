//! Error types shared by the ports and their implementations.

use std::path::PathBuf;

/// Error type for loading or evaluating a classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Format(String),

    #[error("Invalid model parameters: {0}")]
    Invalid(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("File hash mismatch for {0}")]
    HashMismatch(String),

    #[error("Feature table does not match model layout: expected {expected} columns, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// Inputs far outside the training range overflow the class scores.
    #[error("Model output is not a finite distribution")]
    NonFinite,
}

/// Error type for loading the reference curves.
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("Failed to read curve table {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Curve table {0:?} has no rows")]
    Empty(PathBuf),

    #[error("Curve table {path:?} has a non-finite value at row {row}")]
    NonFinite { path: PathBuf, row: usize },
}
