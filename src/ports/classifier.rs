//! Classifier port: Trait for a pre-trained probabilistic model.
//!
//! This trait abstracts the model artifact format from the application logic.

use crate::domain::{ColumnLayout, FeatureTable, ModelError};

/// A read-only, pre-trained classifier.
///
/// Implementations are loaded once at startup and shared across requests,
/// so they must be `Send + Sync` and never mutate on prediction.
pub trait Classifier: Send + Sync {
    /// Column layout the model was trained on.
    fn layout(&self) -> &ColumnLayout;

    /// Number of classes in the model output.
    fn n_classes(&self) -> usize;

    /// Class probability distribution for one aligned row.
    ///
    /// The returned vector has `n_classes()` entries summing to 1.
    ///
    /// # Errors
    /// Returns `ModelError::ShapeMismatch` if the table columns differ from `layout()`,
    /// or `ModelError::NonFinite` if the inputs push the output out of range.
    fn predict_proba(&self, table: &FeatureTable) -> Result<Vec<f64>, ModelError>;
}
