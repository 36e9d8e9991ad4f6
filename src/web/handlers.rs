//! HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Figure, FormValues, Prediction};
use crate::CardiodashError;

use super::error::ServerError;
use super::page::render_page;
use super::state::AppState;

fn fired(n_clicks: Option<u32>) -> bool {
    n_clicks.is_some_and(|n| n > 0)
}

/// Dashboard page with the reference chart embedded
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let figure = state.service.reference_figure();
    let page = render_page(&figure).map_err(CardiodashError::from)?;
    Ok(Html(page))
}

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct FillRequest {
    #[serde(default)]
    pub n_clicks: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct FillResponse {
    /// Field id -> new value; empty when nothing changes
    pub values: FormValues,
}

/// Fill every form field with its example value
pub async fn fill(
    State(state): State<AppState>,
    payload: Result<Json<FillRequest>, JsonRejection>,
) -> Result<Json<FillResponse>, ServerError> {
    let Json(req) = payload?;
    let values = if fired(req.n_clicks) {
        state.service.fill_defaults()
    } else {
        FormValues::new()
    };
    Ok(Json(FillResponse { values }))
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub n_clicks: Option<u32>,
    #[serde(default)]
    pub values: FormValues,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// New chart; `None` leaves the current one in place
    pub figure: Option<Figure>,
    pub prediction: Option<Prediction>,
    pub summary: Option<String>,
}

/// Run the model on the submitted form and return the updated chart
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ServerError> {
    let Json(req) = payload?;
    if !fired(req.n_clicks) {
        return Ok(Json(PredictResponse {
            figure: None,
            prediction: None,
            summary: None,
        }));
    }

    let outcome = state.service.predict(&req.values)?;
    Ok(Json(PredictResponse {
        summary: Some(outcome.prediction.summary()),
        figure: Some(outcome.figure),
        prediction: Some(outcome.prediction),
    }))
}
