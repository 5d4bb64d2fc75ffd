//! JSON prediction API.

use super::{ApiError, AppState};
use crate::domain::features::FeatureRecord;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

/// API response. Probability and confidence are raw [0,1] values here;
/// only the web views scale to percentages.
#[derive(Debug, Serialize)]
pub struct ApiPrediction {
    pub prediction: i64,
    pub probability: f64,
    pub confidence: f64,
    pub message: &'static str,
}

/// POST /api/predict. A malformed JSON body is handled explicitly so the
/// caller always gets a JSON error object, never a bare rejection.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiPrediction>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        warn!("Rejected /api/predict body: {e}");
        ApiError(format!("invalid JSON body: {e}"))
    })?;
    let raw = body.as_object().cloned().unwrap_or_default();
    let record = FeatureRecord::coerce(&raw);
    let result = state.engine.predict(&record).map_err(|e| {
        warn!("Inference failed: {e}");
        ApiError::from(e)
    })?;
    Ok(Json(ApiPrediction {
        prediction: result.label,
        probability: result.probability,
        confidence: result.confidence,
        message: result.message(),
    }))
}

/// GET /health.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_path": state.engine.model_path().display().to_string(),
    }))
}
