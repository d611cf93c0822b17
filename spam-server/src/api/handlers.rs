//! JSON API handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use spam_core::{ClassifierError, Label, SpamClassifier};
use std::sync::Arc;
use tracing::{debug, error};

/// Shared application state
pub struct AppState {
    pub classifier: SpamClassifier,
}

/// Classify request body
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

/// Classify response
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub label: Label,
    pub is_spam: bool,
    pub normalized: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// Map a classification error to a status code and JSON body
pub fn error_response(err: &ClassifierError) -> (StatusCode, Json<ApiError>) {
    match err {
        ClassifierError::EmptyInput => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::new("Message is empty")),
        ),
        other => {
            error!("Classification failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Classification failed")),
            )
        }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "spam-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Classify one message
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, (StatusCode, Json<ApiError>)> {
    debug!("Classify request ({} bytes)", payload.message.len());

    let verdict = state
        .classifier
        .check(&payload.message)
        .map_err(|e| error_response(&e))?;

    Ok(Json(ClassifyResponse {
        label: verdict.label,
        is_spam: verdict.is_spam(),
        normalized: verdict.normalized,
    }))
}
