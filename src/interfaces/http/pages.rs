//! HTML routes: landing page, prediction form, results replay, dashboard.

use super::{ApiError, AppState, render};
use crate::application::{dashboard, presentation};
use crate::domain::features::FeatureRecord;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

pub async fn index() -> Html<String> {
    Html(render::index_page())
}

pub async fn predict_form() -> Html<String> {
    Html(render::form_page())
}

/// POST /predict: coerce the form fields, run inference, render the results
/// page, and remember the prediction under the client's session.
pub async fn predict_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let raw: Map<String, Value> = fields
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();
    let record = FeatureRecord::coerce(&raw);
    let result = state.engine.predict(&record).map_err(|e| {
        warn!("Inference failed for form submission: {e}");
        ApiError::from(e)
    })?;

    let view = presentation::present(&result);
    let page = Html(render::results_page(&view));

    match session_id(&headers) {
        Some(sid) => {
            state.sessions.store(sid, record, result);
            Ok(page.into_response())
        }
        None => {
            let sid = Uuid::new_v4();
            state.sessions.store(sid, record, result);
            let cookie = format!("sid={sid}; Path=/; HttpOnly");
            Ok(([(header::SET_COOKIE, cookie)], page).into_response())
        }
    }
}

/// GET /results: replay the session's last prediction. A missing session
/// or entry is a normal case and redirects to the input form.
pub async fn results(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let entry = session_id(&headers).and_then(|sid| state.sessions.get(&sid));
    match entry {
        Some(entry) => {
            let view = presentation::present(&entry.result);
            Html(render::results_page(&view)).into_response()
        }
        None => Redirect::to("/predict").into_response(),
    }
}

pub async fn dashboard() -> Html<String> {
    Html(render::dashboard_page(
        &dashboard::sample_stats(),
        &dashboard::trend_spec(),
    ))
}

fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == "sid" {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}
