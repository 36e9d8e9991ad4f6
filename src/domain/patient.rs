//! Patient form fields and the encoded clinical feature record.
//!
//! Based on the UCI heart disease attributes (13 features).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A raw value as submitted by a form input.
///
/// Inputs arrive either as JSON numbers or as text typed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Interpret the value as a finite number.
    ///
    /// Text is trimmed and parsed; empty text counts as missing.
    fn as_number(&self, field: &'static str) -> Result<f64, FormError> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(FormError::Missing(field));
                }
                s.parse::<f64>().map_err(|_| FormError::NotNumeric {
                    field,
                    value: s.to_string(),
                })?
            }
        };
        if !n.is_finite() {
            return Err(FormError::NonFinite(field));
        }
        Ok(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Current values of the form, keyed by field id.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Example value used by the "fill" action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Example {
    Number(f64),
    Text(&'static str),
}

impl Example {
    #[must_use]
    pub fn to_value(self) -> FieldValue {
        match self {
            Self::Number(n) => FieldValue::Number(n),
            Self::Text(s) => FieldValue::Text(s.to_string()),
        }
    }
}

/// Static definition of one form input.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field id, also the feature column name
    pub id: &'static str,
    /// Short description shown next to the input
    pub hint: &'static str,
    /// Value written by the fill action
    pub example: Example,
}

/// All form fields, in display and feature order.
pub const FIELDS: [FieldSpec; 13] = [
    FieldSpec { id: "age", hint: "years", example: Example::Number(54.0) },
    FieldSpec { id: "sex", hint: "male / female", example: Example::Text("male") },
    FieldSpec { id: "cp", hint: "chest pain type (0-3)", example: Example::Number(3.0) },
    FieldSpec { id: "trestbps", hint: "resting BP, mmHg", example: Example::Number(132.0) },
    FieldSpec { id: "chol", hint: "cholesterol, mg/dL", example: Example::Number(247.0) },
    FieldSpec { id: "fbs", hint: "fasting sugar > 120 (0/1)", example: Example::Number(0.0) },
    FieldSpec { id: "restecg", hint: "resting ECG (0-2)", example: Example::Number(1.0) },
    FieldSpec { id: "thalach", hint: "max heart rate", example: Example::Number(150.0) },
    FieldSpec { id: "exang", hint: "exercise angina (0/1)", example: Example::Number(0.0) },
    FieldSpec { id: "oldpeak", hint: "ST depression", example: Example::Number(1.0) },
    FieldSpec { id: "slop", hint: "ST slope (0-2)", example: Example::Number(2.0) },
    FieldSpec { id: "ca", hint: "major vessels (0-4)", example: Example::Number(1.0) },
    FieldSpec { id: "thal", hint: "thalassemia (0-3)", example: Example::Number(3.0) },
];

/// Form values populated with every field's example.
#[must_use]
pub fn example_form() -> FormValues {
    FIELDS
        .iter()
        .map(|f| (f.id.to_string(), f.example.to_value()))
        .collect()
}

/// Encode the sex input: exactly `"male"` is 1, anything else is 0.
#[must_use]
pub fn encode_sex(value: Option<&FieldValue>) -> f64 {
    match value {
        Some(FieldValue::Text(s)) if s == "male" => 1.0,
        _ => 0.0,
    }
}

/// Errors reading the form into a feature record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Missing value for '{0}'")]
    Missing(&'static str),

    #[error("Value '{value}' for '{field}' is not a number")]
    NotNumeric { field: &'static str, value: String },

    #[error("Value for '{0}' is not finite")]
    NonFinite(&'static str),
}

/// The 13 clinical attributes, numeric, with sex already encoded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: f64,
    /// 1 = male, 0 = otherwise
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slop: f64,
    /// Number of major vessels; one-hot expanded
    pub ca: f64,
    /// Thalassemia code; one-hot expanded
    pub thal: f64,
}

impl FeatureRecord {
    /// Read a record from the current form values.
    ///
    /// # Errors
    /// Returns the first missing or non-numeric field, in field order.
    pub fn from_form(values: &FormValues) -> Result<Self, FormError> {
        let num = |id: &'static str| -> Result<f64, FormError> {
            values
                .get(id)
                .ok_or(FormError::Missing(id))
                .and_then(|v| v.as_number(id))
        };

        Ok(Self {
            age: num("age")?,
            sex: encode_sex(values.get("sex")),
            cp: num("cp")?,
            trestbps: num("trestbps")?,
            chol: num("chol")?,
            fbs: num("fbs")?,
            restecg: num("restecg")?,
            thalach: num("thalach")?,
            exang: num("exang")?,
            oldpeak: num("oldpeak")?,
            slop: num("slop")?,
            ca: num("ca")?,
            thal: num("thal")?,
        })
    }

    /// Values paired with their field ids, in `FIELDS` order.
    #[must_use]
    pub fn named_values(&self) -> [(&'static str, f64); 13] {
        [
            ("age", self.age),
            ("sex", self.sex),
            ("cp", self.cp),
            ("trestbps", self.trestbps),
            ("chol", self.chol),
            ("fbs", self.fbs),
            ("restecg", self.restecg),
            ("thalach", self.thalach),
            ("exang", self.exang),
            ("oldpeak", self.oldpeak),
            ("slop", self.slop),
            ("ca", self.ca),
            ("thal", self.thal),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_encoding_is_total() {
        assert_eq!(encode_sex(Some(&"male".into())), 1.0);
        assert_eq!(encode_sex(Some(&"female".into())), 0.0);
        assert_eq!(encode_sex(Some(&"Male".into())), 0.0);
        assert_eq!(encode_sex(Some(&"".into())), 0.0);
        assert_eq!(encode_sex(Some(&FieldValue::Number(1.0))), 0.0);
        assert_eq!(encode_sex(None), 0.0);
    }

    #[test]
    fn test_example_form_has_every_field() {
        let form = example_form();
        assert_eq!(form.len(), FIELDS.len());
        assert_eq!(form["age"], FieldValue::Number(54.0));
        assert_eq!(form["sex"], FieldValue::Text("male".into()));
        assert_eq!(form["thal"], FieldValue::Number(3.0));
    }

    #[test]
    fn test_record_from_example_form() {
        let record = FeatureRecord::from_form(&example_form()).expect("Should parse");
        assert!((record.age - 54.0).abs() < f64::EPSILON);
        assert!((record.sex - 1.0).abs() < f64::EPSILON);
        assert!((record.chol - 247.0).abs() < f64::EPSILON);
        assert!((record.ca - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_accepts_numeric_text() {
        let mut form = example_form();
        form.insert("oldpeak".into(), " 2.5 ".into());
        let record = FeatureRecord::from_form(&form).expect("Should parse");
        assert!((record.oldpeak - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_errors() {
        let mut form = example_form();
        form.remove("chol");
        assert_eq!(FeatureRecord::from_form(&form), Err(FormError::Missing("chol")));

        let mut form = example_form();
        form.insert("thalach".into(), "fast".into());
        assert!(matches!(
            FeatureRecord::from_form(&form),
            Err(FormError::NotNumeric { field: "thalach", .. })
        ));

        let mut form = example_form();
        form.insert("age".into(), "NaN".into());
        assert_eq!(FeatureRecord::from_form(&form), Err(FormError::NonFinite("age")));
    }

    #[test]
    fn test_named_values_follow_field_order() {
        let record = FeatureRecord::default();
        let ids: Vec<_> = record.named_values().iter().map(|(id, _)| *id).collect();
        let expected: Vec<_> = FIELDS.iter().map(|f| f.id).collect();
        assert_eq!(ids, expected);
    }
}
