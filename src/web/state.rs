//! Shared server state: the composition root.

use std::sync::Arc;

use crate::adapters::{CsvCurveStore, SoftmaxModel};
use crate::application::PredictionService;
use crate::ports::ReferenceStore;
use crate::{AppConfig, CardiodashError};

/// State shared by every handler. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService<SoftmaxModel>>,
}

impl AppState {
    #[must_use]
    pub fn new(service: PredictionService<SoftmaxModel>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Load the model and reference curves named by `config`.
    ///
    /// # Errors
    /// Returns error if an artifact cannot be loaded or the configured
    /// class index does not exist in the model.
    pub fn from_config(config: &AppConfig) -> Result<Self, CardiodashError> {
        let model = SoftmaxModel::load(&config.model_dir, config.require_manifest)?;
        let curves = CsvCurveStore::new(&config.data_dir).load_curves()?;
        let service =
            PredictionService::new(Arc::new(model), Arc::new(curves), config.probability_class)?;
        Ok(Self::new(service))
    }
}
