//! Prediction result types.
//!
//! Represents the output of the heart disease classifier for one patient.

use serde::{Deserialize, Serialize};

/// Coarse risk band for a predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below 0.3
    Low,
    /// 0.3 up to 0.7
    Moderate,
    /// 0.7 and above
    High,
}

impl RiskLevel {
    /// Band a probability in `[0, 1]`.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.7 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// The probability range this band covers, for the summary line.
    #[must_use]
    pub fn band(&self) -> &'static str {
        match self {
            Self::Low => "under 30%",
            Self::Moderate => "30% to 70%",
            Self::High => "70% or more",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

/// One model prediction, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Patient age, the x coordinate of the chart marker
    pub age: f64,

    /// Probability of the selected class
    pub probability: f64,

    /// Index of the selected class in the model output
    pub class_index: usize,

    /// Full distribution returned by the model
    pub class_probabilities: Vec<f64>,

    /// Risk band of `probability`
    pub risk_level: RiskLevel,

    /// When the prediction was made
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Select `class_index` from a class distribution.
    ///
    /// Returns `None` if the distribution has no such class.
    #[must_use]
    pub fn select(age: f64, class_probabilities: Vec<f64>, class_index: usize) -> Option<Self> {
        let probability = *class_probabilities.get(class_index)?;
        Some(Self {
            age,
            probability,
            class_index,
            risk_level: RiskLevel::from_probability(probability),
            class_probabilities,
            created_at: chrono::Utc::now(),
        })
    }

    /// One-line summary shown under the form.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Predicted probability at age {}: {:.1}% ({} band, {})",
            self.age,
            self.probability * 100.0,
            self.risk_level,
            self.risk_level.band()
        )
    }
}
