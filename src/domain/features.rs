//! Feature table assembly: one-hot expansion and column alignment.

use serde::{Deserialize, Serialize};

use super::patient::FeatureRecord;

/// Fields expanded into indicator columns instead of being passed through.
pub const ONE_HOT_FIELDS: [&str; 2] = ["ca", "thal"];

/// Ordered column names the model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnLayout(Vec<String>);

impl ColumnLayout {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }
}

/// Name of the indicator column for `field` taking `code`.
///
/// Integral codes print without a fractional part (`ca_1`, not `ca_1.0`).
#[must_use]
pub fn indicator_column(field: &str, code: f64) -> String {
    if code.fract() == 0.0 && code.abs() < 1e15 {
        format!("{field}_{}", code as i64)
    } else {
        format!("{field}_{code}")
    }
}

/// A single row aligned to a `ColumnLayout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureTable {
    /// Expand `record` and reindex it onto `layout`.
    ///
    /// Layout columns the record does not produce are 0. Columns the record
    /// produces but the layout does not list are dropped and returned by name.
    #[must_use]
    pub fn assemble(record: &FeatureRecord, layout: &ColumnLayout) -> (Self, Vec<String>) {
        let mut values = vec![0.0; layout.len()];
        let mut dropped = Vec::new();

        for (field, value) in record.named_values() {
            let (column, cell) = if ONE_HOT_FIELDS.contains(&field) {
                (indicator_column(field, value), 1.0)
            } else {
                (field.to_string(), value)
            };

            match layout.position(&column) {
                Some(idx) => values[idx] = cell,
                None => dropped.push(column),
            }
        }

        let table = Self {
            columns: layout.columns().to_vec(),
            values,
        };
        (table, dropped)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named column, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }
}
