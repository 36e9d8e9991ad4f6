//! Model adapter: Implementation of `Classifier` over a JSON model artifact.
//!
//! The artifact is a multinomial logistic model exported by the training
//! pipeline: per-class coefficient rows over a fixed column layout, per-class
//! intercepts and an optional standard scaler.
//!
//! # Integrity
//!
//! When `manifest.json` sits next to the model, it must list `model.json`
//! and every listed file must match its SHA-256. Set `require_manifest`
//! to refuse loading a model without one.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{ColumnLayout, FeatureTable, ModelError};
use crate::ports::Classifier;

/// File name of the model artifact inside the model directory.
pub const MODEL_FILE: &str = "model.json";

/// File name of the hash manifest inside the model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Only manifest version understood by the loader.
pub const MANIFEST_VERSION: u32 = 1;

/// Hash manifest binding the files of a model directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Relative file name -> lowercase hex SHA-256
    pub files: BTreeMap<String, String>,
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn read(path: &Path) -> Result<Vec<u8>, ModelError> {
    fs::read(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Check `manifest.json` in `model_dir` against the files it lists.
///
/// Returns `Ok(None)` when no manifest exists.
///
/// # Errors
/// Returns error if the manifest is malformed, does not bind the model file,
/// or any listed file is unreadable or has a different hash.
pub fn verify_manifest(model_dir: &Path) -> Result<Option<ModelManifest>, ModelError> {
    let manifest_path = model_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Ok(None);
    }

    let manifest: ModelManifest = serde_json::from_slice(&read(&manifest_path)?)
        .map_err(|e| ModelError::Manifest(format!("invalid {MANIFEST_FILE}: {e}")))?;

    if manifest.version != MANIFEST_VERSION {
        return Err(ModelError::Manifest(format!(
            "unsupported version {}",
            manifest.version
        )));
    }
    if !manifest.files.contains_key(MODEL_FILE) {
        return Err(ModelError::Manifest(format!("{MANIFEST_FILE} must include {MODEL_FILE}")));
    }

    for (rel, expected_hex) in &manifest.files {
        let actual_hex = sha256_hex(&read(&model_dir.join(rel))?);
        if !actual_hex.eq_ignore_ascii_case(expected_hex) {
            return Err(ModelError::HashMismatch(rel.clone()));
        }
    }

    tracing::info!("Model manifest verified ({} files)", manifest.files.len());
    Ok(Some(manifest))
}

/// Multinomial logistic model over a fixed column layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxModel {
    /// Class labels, in output order
    pub classes: Vec<i64>,
    /// Expected input columns
    pub columns: ColumnLayout,
    /// One row of `columns.len()` weights per class
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per class
    pub intercepts: Vec<f64>,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
}

impl SoftmaxModel {
    /// Load and check the model in `model_dir`.
    ///
    /// # Errors
    /// Returns error if the artifact is unreadable, fails manifest
    /// verification, is missing a required manifest, or has inconsistent shapes.
    pub fn load(model_dir: &Path, require_manifest: bool) -> Result<Self, ModelError> {
        match verify_manifest(model_dir)? {
            Some(_) => {}
            None if require_manifest => {
                return Err(ModelError::Manifest(format!(
                    "{MANIFEST_FILE} required but not found in {model_dir:?}"
                )));
            }
            None => tracing::warn!("No {MANIFEST_FILE} in {:?}; loading unverified model", model_dir),
        }

        let model_path = model_dir.join(MODEL_FILE);
        let model: Self = serde_json::from_slice(&read(&model_path)?)
            .map_err(|e| ModelError::Format(e.to_string()))?;
        model.validate()?;

        tracing::info!(
            "Loaded model from {:?} (n_classes={}, n_columns={})",
            model_path,
            model.classes.len(),
            model.columns.len()
        );
        Ok(model)
    }

    /// Check that every parameter vector matches the layout and class count.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` describing the first inconsistency.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n_classes = self.classes.len();
        let n_cols = self.columns.len();

        if n_classes == 0 || n_cols == 0 {
            return Err(ModelError::Invalid("model has no classes or no columns".into()));
        }
        if self.coefficients.len() != n_classes || self.intercepts.len() != n_classes {
            return Err(ModelError::Invalid(format!(
                "expected {n_classes} coefficient rows and intercepts"
            )));
        }
        if let Some(row) = self.coefficients.iter().position(|r| r.len() != n_cols) {
            return Err(ModelError::Invalid(format!(
                "coefficient row {row} does not have {n_cols} entries"
            )));
        }
        for (name, v) in [("scaler_mean", &self.scaler_mean), ("scaler_scale", &self.scaler_scale)] {
            if v.as_ref().is_some_and(|v| v.len() != n_cols) {
                return Err(ModelError::Invalid(format!("{name} does not have {n_cols} entries")));
            }
        }
        if self
            .scaler_scale
            .as_ref()
            .is_some_and(|s| s.iter().any(|&x| x == 0.0))
        {
            return Err(ModelError::Invalid("scaler_scale contains zero".into()));
        }

        let all_finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .chain(self.scaler_mean.iter().flatten())
            .chain(self.scaler_scale.iter().flatten())
            .all(|x| x.is_finite());
        if !all_finite {
            return Err(ModelError::Invalid("non-finite parameter".into()));
        }

        Ok(())
    }

    fn standardize(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mean = self.scaler_mean.as_ref().map_or(0.0, |m| m[i]);
                let scale = self.scaler_scale.as_ref().map_or(1.0, |s| s[i]);
                (x - mean) / scale
            })
            .collect()
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl Classifier for SoftmaxModel {
    fn layout(&self) -> &ColumnLayout {
        &self.columns
    }

    fn n_classes(&self) -> usize {
        self.classes.len()
    }

    fn predict_proba(&self, table: &FeatureTable) -> Result<Vec<f64>, ModelError> {
        if table.columns() != self.columns.columns() {
            return Err(ModelError::ShapeMismatch {
                expected: self.columns.len(),
                got: table.columns().len(),
            });
        }

        let x = self.standardize(table.values());
        let scores: Vec<f64> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| b + row.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>())
            .collect();

        let proba = softmax(&scores);
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::NonFinite);
        }
        Ok(proba)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{example_form, heart_layout, FeatureRecord};
    use tempfile::tempdir;

    /// Three-class model over the heart layout where age alone drives class 2.
    pub(crate) fn age_model() -> SoftmaxModel {
        let layout = heart_layout();
        let n = layout.len();
        let mut age_row = vec![0.0; n];
        age_row[0] = 2.0;
        SoftmaxModel {
            classes: vec![0, 1, 2],
            columns: layout,
            coefficients: vec![vec![0.0; n], vec![0.0; n], age_row],
            intercepts: vec![0.0, 0.0, -1.0],
            scaler_mean: Some(vec![50.0; n]),
            scaler_scale: Some(vec![10.0; n]),
        }
    }

    fn write_model(dir: &Path, model: &SoftmaxModel) -> Vec<u8> {
        let bytes = serde_json::to_vec(model).expect("serialize model");
        fs::write(dir.join(MODEL_FILE), &bytes).expect("write model");
        bytes
    }

    fn write_manifest(dir: &Path, files: &[(&str, &[u8])]) {
        let manifest = ModelManifest {
            version: MANIFEST_VERSION,
            created_at: None,
            files: files
                .iter()
                .map(|(name, bytes)| ((*name).to_string(), sha256_hex(bytes)))
                .collect(),
        };
        fs::write(dir.join(MANIFEST_FILE), serde_json::to_vec(&manifest).expect("json"))
            .expect("write manifest");
    }

    fn example_table(model: &SoftmaxModel) -> FeatureTable {
        let record = FeatureRecord::from_form(&example_form()).expect("parse");
        FeatureTable::assemble(&record, model.layout()).0
    }

    #[test]
    fn test_predict_proba_is_distribution() {
        let model = age_model();
        let proba = model.predict_proba(&example_table(&model)).expect("predict");

        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // age 54 -> standardized 0.4 -> class 2 score -0.2
        let e = (-0.2f64).exp();
        assert!((proba[2] - e / (2.0 + e)).abs() < 1e-12);
    }

    #[test]
    fn test_predict_proba_rejects_misaligned_table() {
        let model = age_model();
        let record = FeatureRecord::default();
        let other = ColumnLayout::new(vec!["age".into(), "sex".into()]);
        let (table, _) = FeatureTable::assemble(&record, &other);

        assert!(matches!(
            model.predict_proba(&table),
            Err(ModelError::ShapeMismatch { expected: 20, got: 2 })
        ));
    }

    #[test]
    fn test_predict_proba_rejects_overflowing_inputs() {
        let mut model = age_model();
        model.coefficients[2][0] = 1e10;
        let mut form = example_form();
        form.insert("age".into(), "1e308".into());
        let record = FeatureRecord::from_form(&form).expect("parse");
        let (table, _) = FeatureTable::assemble(&record, model.layout());

        assert!(matches!(model.predict_proba(&table), Err(ModelError::NonFinite)));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let mut model = age_model();
        model.coefficients[1].pop();
        assert!(matches!(model.validate(), Err(ModelError::Invalid(_))));

        let mut model = age_model();
        model.intercepts.push(0.0);
        assert!(model.validate().is_err());

        let mut model = age_model();
        model.scaler_scale = Some(vec![0.0; model.columns.len()]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_load_unverified_model() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &age_model());

        let model = SoftmaxModel::load(temp.path(), false).expect("load");
        assert_eq!(model.n_classes(), 3);
        assert_eq!(model.layout(), &heart_layout());
    }

    #[test]
    fn test_load_requires_manifest_when_asked() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &age_model());

        assert!(matches!(
            SoftmaxModel::load(temp.path(), true),
            Err(ModelError::Manifest(_))
        ));
    }

    #[test]
    fn test_load_with_matching_manifest() {
        let temp = tempdir().expect("tempdir");
        let bytes = write_model(temp.path(), &age_model());
        write_manifest(temp.path(), &[(MODEL_FILE, &bytes)]);

        SoftmaxModel::load(temp.path(), true).expect("verified load");
    }

    #[test]
    fn test_load_fails_on_hash_mismatch() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &age_model());
        write_manifest(temp.path(), &[(MODEL_FILE, b"something else")]);

        assert!(matches!(
            SoftmaxModel::load(temp.path(), false),
            Err(ModelError::HashMismatch(name)) if name == MODEL_FILE
        ));
    }

    #[test]
    fn test_manifest_must_bind_model_file() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &age_model());
        fs::write(temp.path().join("notes.txt"), b"hi").expect("write");
        write_manifest(temp.path(), &[("notes.txt", b"hi")]);

        assert!(matches!(
            verify_manifest(temp.path()),
            Err(ModelError::Manifest(_))
        ));
    }
}
