//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with on-disk artifacts:
//! - `model`: JSON multinomial logistic model with hash manifest
//! - `curves`: CSV reference curve tables

pub mod curves;
pub mod model;

pub use curves::CsvCurveStore;
pub use model::SoftmaxModel;
