//! Reference port: Trait for loading the static reference curves.

use crate::domain::{CurveError, ReferenceCurves};

/// Source of the precomputed male/female probability curves.
pub trait ReferenceStore {
    /// Load both curves.
    ///
    /// # Errors
    /// Returns error if a table is missing or malformed.
    fn load_curves(&self) -> Result<ReferenceCurves, CurveError>;
}
