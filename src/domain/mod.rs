//! Domain layer: Core types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Everything here is built per request or once at startup and never mutated.

pub mod chart;
mod curves;
mod diagnosis;
mod error;
mod features;
mod patient;

pub use chart::Figure;
pub use curves::{CurvePoint, ReferenceCurve, ReferenceCurves};
pub use diagnosis::{Prediction, RiskLevel};
pub use error::{CurveError, ModelError};
pub use features::{indicator_column, ColumnLayout, FeatureTable, ONE_HOT_FIELDS};
pub use patient::{
    encode_sex, example_form, Example, FeatureRecord, FieldSpec, FieldValue, FormError,
    FormValues, FIELDS,
};

#[cfg(test)]
pub(crate) use features::tests::heart_layout;
