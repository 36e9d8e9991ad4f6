//! Prediction service: Assembles inference requests and builds the chart.
//!
//! This service coordinates:
//! - Reading form values into a feature record
//! - One-hot expansion onto the model's column layout
//! - Class probability selection
//! - Figure construction with the reference curves

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{
    example_form, FeatureRecord, FeatureTable, Figure, FormValues, Prediction, ReferenceCurves,
};
use crate::ports::Classifier;
use crate::CardiodashError;

/// Result of one predict action.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub prediction: Prediction,
    pub figure: Figure,
}

/// Immutable service holding the model and reference curves.
///
/// Built once at startup and shared by every request.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    curves: Arc<ReferenceCurves>,
    class_index: usize,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    ///
    /// # Arguments
    /// * `class_index` - Which class of the model output is shown as "probability"
    ///
    /// # Errors
    /// Returns `CardiodashError::ClassIndex` if the model has no such class.
    pub fn new(
        classifier: Arc<C>,
        curves: Arc<ReferenceCurves>,
        class_index: usize,
    ) -> Result<Self, CardiodashError> {
        let n_classes = classifier.n_classes();
        if class_index >= n_classes {
            return Err(CardiodashError::ClassIndex {
                index: class_index,
                n_classes,
            });
        }

        tracing::info!(
            "Prediction service ready (class {} of {}, {} columns)",
            class_index,
            n_classes,
            classifier.layout().len()
        );

        Ok(Self {
            classifier,
            curves,
            class_index,
        })
    }

    /// Values written into the form by the fill action.
    #[must_use]
    pub fn fill_defaults(&self) -> FormValues {
        example_form()
    }

    /// Chart shown before any prediction.
    #[must_use]
    pub fn reference_figure(&self) -> Figure {
        Figure::reference(&self.curves)
    }

    /// Run the model on the current form values.
    ///
    /// # Errors
    /// Returns error if a field is missing or non-numeric, or the model
    /// rejects the assembled table.
    pub fn predict(&self, values: &FormValues) -> Result<PredictionOutcome, CardiodashError> {
        let record = FeatureRecord::from_form(values)?;

        let (table, dropped) = FeatureTable::assemble(&record, self.classifier.layout());
        if !dropped.is_empty() {
            tracing::warn!("Columns not in model layout, ignored: {}", dropped.join(", "));
        }

        let distribution = self.classifier.predict_proba(&table)?;
        let n_classes = distribution.len();
        let prediction = Prediction::select(record.age, distribution, self.class_index).ok_or(
            CardiodashError::ClassIndex {
                index: self.class_index,
                n_classes,
            },
        )?;

        tracing::info!(
            "Prediction complete: probability={:.3}, risk={}",
            prediction.probability,
            prediction.risk_level
        );

        let figure = Figure::with_prediction(&self.curves, &prediction);
        Ok(PredictionOutcome { prediction, figure })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::model::tests::age_model;
    use crate::adapters::SoftmaxModel;
    use crate::domain::{CurvePoint, FieldValue, FormError, ReferenceCurve};

    pub(crate) fn test_curves() -> ReferenceCurves {
        let line = |base: f64| {
            ReferenceCurve::new(
                (30..=70)
                    .step_by(10)
                    .map(|age| CurvePoint {
                        age: f64::from(age),
                        probability: base + f64::from(age) / 200.0,
                    })
                    .collect(),
            )
        };
        ReferenceCurves {
            male: line(0.1),
            female: line(0.0),
        }
    }

    pub(crate) fn create_test_service() -> PredictionService<SoftmaxModel> {
        PredictionService::new(Arc::new(age_model()), Arc::new(test_curves()), 2)
            .expect("Should create service")
    }

    #[test]
    fn test_rejects_missing_class() {
        let result = PredictionService::new(Arc::new(age_model()), Arc::new(test_curves()), 3);
        assert!(matches!(
            result,
            Err(CardiodashError::ClassIndex { index: 3, n_classes: 3 })
        ));
    }

    #[test]
    fn test_fill_defaults_is_constant() {
        let service = create_test_service();
        assert_eq!(service.fill_defaults(), service.fill_defaults());
        assert_eq!(service.fill_defaults()["sex"], FieldValue::Text("male".into()));
    }

    #[test]
    fn test_predict_example() {
        let service = create_test_service();
        let outcome = service.predict(&service.fill_defaults()).expect("Should predict");

        assert!(outcome.prediction.probability > 0.0);
        assert!(outcome.prediction.probability < 1.0);
        assert_eq!(outcome.prediction.class_index, 2);
        assert_eq!(outcome.prediction.class_probabilities.len(), 3);
        assert_eq!(outcome.figure.data.len(), 3);
        assert_eq!(outcome.figure.data[2].x, vec![54.0]);
        assert_eq!(outcome.figure.data[2].y, vec![outcome.prediction.probability]);
    }

    #[test]
    fn test_predict_is_monotonic_in_age_for_age_model() {
        let service = create_test_service();
        let mut form = service.fill_defaults();
        let young = service.predict(&form).expect("predict").prediction.probability;
        form.insert("age".into(), FieldValue::Number(70.0));
        let old = service.predict(&form).expect("predict").prediction.probability;
        assert!(old > young);
    }

    #[test]
    fn test_predict_out_of_range_code_still_predicts() {
        let service = create_test_service();
        let mut form = service.fill_defaults();
        form.insert("thal".into(), FieldValue::Number(7.0));
        let outcome = service.predict(&form).expect("Should predict");
        assert_eq!(outcome.figure.data.len(), 3);
    }

    #[test]
    fn test_predict_reports_form_errors() {
        let service = create_test_service();
        let mut form = service.fill_defaults();
        form.insert("chol".into(), "".into());

        assert!(matches!(
            service.predict(&form),
            Err(CardiodashError::Validation(FormError::Missing("chol")))
        ));
    }

    #[test]
    fn test_reference_figure() {
        let service = create_test_service();
        assert_eq!(service.reference_figure().data.len(), 2);
    }
}
