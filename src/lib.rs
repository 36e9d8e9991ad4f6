//! # cardiodash
//!
//! Heart disease probability dashboard.
//!
//! This crate provides:
//! - Encoding of 13 clinical form inputs into a model-aligned feature table
//! - Inference with a pre-trained multinomial classifier loaded from disk
//! - A web page plotting the prediction against per-sex reference curves
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (form fields, feature table, curves, figure)
//! - `ports`: Trait definitions for the model and curve sources
//! - `adapters`: Concrete implementations (JSON model, CSV curves)
//! - `application`: The prediction service
//! - `web`: HTTP server and page

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod web;

pub use config::AppConfig;
pub use domain::{FeatureRecord, FeatureTable, Prediction, RiskLevel};

/// Result type for cardiodash operations
pub type Result<T> = std::result::Result<T, CardiodashError>;

/// Main error type for cardiodash
#[derive(Debug, thiserror::Error)]
pub enum CardiodashError {
    #[error("Invalid form input: {0}")]
    Validation(#[from] domain::FormError),

    #[error("Model error: {0}")]
    Model(#[from] domain::ModelError),

    #[error("Reference curves unavailable: {0}")]
    Curves(#[from] domain::CurveError),

    #[error("Class index {index} out of range for a model with {n_classes} classes")]
    ClassIndex { index: usize, n_classes: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
