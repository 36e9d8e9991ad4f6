//! Curve adapter: `ReferenceStore` backed by CSV tables.
//!
//! Each sex has its own table with an `age,proba` header, exported once by
//! the training pipeline.

use std::path::{Path, PathBuf};

use crate::domain::{CurveError, CurvePoint, ReferenceCurve, ReferenceCurves};
use crate::ports::ReferenceStore;

pub const MALE_FILE: &str = "reference_male.csv";
pub const FEMALE_FILE: &str = "reference_female.csv";

/// Reads `reference_male.csv` and `reference_female.csv` from a directory.
#[derive(Debug, Clone)]
pub struct CsvCurveStore {
    dir: PathBuf,
}

impl CsvCurveStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_table(path: &Path) -> Result<ReferenceCurve, CurveError> {
        let csv_err = |e: csv::Error| CurveError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        let mut points = Vec::new();
        for (row, record) in reader.deserialize::<CurvePoint>().enumerate() {
            let point = record.map_err(csv_err)?;
            if !point.age.is_finite() || !point.probability.is_finite() {
                return Err(CurveError::NonFinite {
                    path: path.to_path_buf(),
                    row: row + 1,
                });
            }
            points.push(point);
        }

        if points.is_empty() {
            return Err(CurveError::Empty(path.to_path_buf()));
        }

        tracing::debug!("Read {} curve points from {:?}", points.len(), path);
        Ok(ReferenceCurve::new(points))
    }
}

impl ReferenceStore for CsvCurveStore {
    fn load_curves(&self) -> Result<ReferenceCurves, CurveError> {
        let curves = ReferenceCurves {
            male: Self::read_table(&self.dir.join(MALE_FILE))?,
            female: Self::read_table(&self.dir.join(FEMALE_FILE))?,
        };
        tracing::info!(
            "Loaded reference curves from {:?} (male={}, female={})",
            self.dir,
            curves.male.points().len(),
            curves.female.points().len()
        );
        Ok(curves)
    }
}
