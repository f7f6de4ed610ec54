//! HTTP handlers for the review form.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use reviewdeck_client::Transport;
use reviewdeck_core::credentials::CredentialUpdate;
use reviewdeck_core::generation::{
    GenerationRequest, GenerationResult, SELF_TEST_MAX_TOKENS, SELF_TEST_TEMPERATURE,
};
use reviewdeck_core::prompt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::AppState;
use super::form::FormData;
use super::page;

/// Request-level failure, answered as `{"error": ...}`
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("invalid form data: {}", err.body_text()))
    }
}

/// Map a generation result onto the form endpoints' response shape.
fn respond(result: GenerationResult) -> (StatusCode, Json<Value>) {
    match result {
        GenerationResult::Text {
            text,
            raw_response: false,
        } => (StatusCode::OK, Json(json!({ "result": text }))),
        GenerationResult::Text { text, .. } => (
            StatusCode::OK,
            Json(json!({ "result": text, "raw_response": true })),
        ),
        GenerationResult::Error { error } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error })),
        ),
    }
}

/// The review page.
pub async fn index<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
) -> Result<Html<String>, AppError> {
    page::render_index(&state.config, state.env_keys)
        .map(Html)
        .map_err(|e| AppError::Internal(format!("failed to render page: {e}")))
}

/// Apply a partial credential update.
pub async fn set_api_keys<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    Json(update): Json<CredentialUpdate>,
) -> Json<Value> {
    state.dispatcher.credentials().update(&update);
    info!("API keys saved");
    Json(json!({ "status": "saved" }))
}

pub async fn transform_submission<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = FormData::from_multipart(multipart).await?;
    let prompt = prompt::submission_prompt(
        &form.source_text(),
        form.get("extra_prompt"),
        &state.config.limits,
    );
    let request = GenerationRequest::new(form.model(state.config.default_model()), prompt)
        .with_max_tokens(form.max_tokens()?);

    Ok(respond(state.dispatcher.generate(&request).await))
}

pub async fn transform_checklist<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = FormData::from_multipart(multipart).await?;
    let prompt = prompt::checklist_prompt(
        &form.source_text(),
        form.get("extra_prompt"),
        &state.config.limits,
    );
    let request = GenerationRequest::new(form.model(state.config.default_model()), prompt)
        .with_max_tokens(form.max_tokens()?);

    Ok(respond(state.dispatcher.generate(&request).await))
}

pub async fn run_review<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = FormData::from_multipart(multipart).await?;
    let prompt = prompt::review_prompt(
        form.get("submission"),
        form.get("checklist"),
        form.get("extra_prompt"),
        &state.config.limits,
    );
    let request = GenerationRequest::new(form.model(state.config.default_model()), prompt)
        .with_max_tokens(form.max_tokens()?);

    Ok(respond(state.dispatcher.generate(&request).await))
}

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    model: String,
    provider: Option<&'static str>,
    key_available: bool,
}

/// Configured models with their routed provider and key availability.
pub async fn list_models<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
) -> Json<Vec<ModelEntry>> {
    let entries = state
        .config
        .models
        .iter()
        .map(|model| {
            let provider = state.dispatcher.route(model);
            ModelEntry {
                model: model.clone(),
                provider: provider.map(|p| p.name()),
                key_available: provider.is_some_and(|p| state.dispatcher.has_credential(p)),
            }
        })
        .collect();
    Json(entries)
}

#[derive(Debug, Default, Deserialize)]
pub struct SelfTestRequest {
    #[serde(default)]
    model: Option<String>,
}

/// Connectivity self-test: a tiny deterministic generation.
pub async fn self_test<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    Json(body): Json<SelfTestRequest>,
) -> (StatusCode, Json<Value>) {
    let model = body
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.default_model().to_string());
    let request = GenerationRequest::new(model, prompt::self_test_prompt())
        .with_max_tokens(SELF_TEST_MAX_TOKENS)
        .with_temperature(SELF_TEST_TEMPERATURE);

    respond(state.dispatcher.generate(&request).await)
}
