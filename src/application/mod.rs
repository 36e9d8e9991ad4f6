//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the dashboard's two actions: fill the form, predict.

mod prediction;

pub use prediction::{PredictionOutcome, PredictionService};

#[cfg(test)]
pub(crate) use prediction::tests;
