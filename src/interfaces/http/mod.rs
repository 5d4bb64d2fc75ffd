//! HTTP interface: router, shared state, and error-to-response mapping.

pub mod api;
pub mod pages;
pub mod render;

use crate::application::engine::PredictionEngine;
use crate::domain::errors::PipelineError;
use crate::infrastructure::SessionStore;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PredictionEngine>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(engine: Arc<PredictionEngine>) -> Self {
        Self {
            engine,
            sessions: SessionStore::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/predict", get(pages::predict_form).post(pages::predict_submit))
        .route("/results", get(pages::results))
        .route("/dashboard", get(pages::dashboard))
        .route("/api/predict", post(api::predict))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Request-boundary error: everything the prediction path can fail with is
/// surfaced as a JSON `{error}` body with a server-error status, matching
/// the API contract. No structured codes distinguish failure causes.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0 })),
        )
            .into_response()
    }
}
