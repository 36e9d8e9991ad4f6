//! Precomputed probability-vs-age reference curves.

use serde::{Deserialize, Serialize};

/// One `(age, probability)` sample of a reference curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub age: f64,
    #[serde(rename = "proba")]
    pub probability: f64,
}

/// A static trend line shown for visual comparison only.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    points: Vec<CurvePoint>,
}

impl ReferenceCurve {
    /// Build a curve, ordering points by age.
    #[must_use]
    pub fn new(mut points: Vec<CurvePoint>) -> Self {
        points.sort_by(|a, b| a.age.total_cmp(&b.age));
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    #[must_use]
    pub fn ages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.age).collect()
    }

    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.probability).collect()
    }
}

/// Reference curves for both sexes, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurves {
    pub male: ReferenceCurve,
    pub female: ReferenceCurve,
}
