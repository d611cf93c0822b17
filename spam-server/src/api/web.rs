use askama_axum::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use spam_core::ClassifierError;
use std::sync::Arc;
use tracing::error;

use crate::api::handlers::AppState;

pub const EMPTY_NOTICE: &str = "Please enter a message to analyze.";
pub const SPAM_NOTICE: &str = "This message is Spam!";
pub const NOT_SPAM_NOTICE: &str = "This message is Not Spam.";
pub const FAILURE_NOTICE: &str = "Something went wrong while checking this message. Please try again.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    message: String,
    // warning | error | success | failure, empty when there is nothing to show
    notice_kind: String,
    notice_text: String,
    version: String,
}

impl IndexTemplate {
    fn new(message: String, notice_kind: &str, notice_text: &str) -> Self {
        Self {
            message,
            notice_kind: notice_kind.to_string(),
            notice_text: notice_text.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct CheckForm {
    #[serde(default)]
    message: String,
}

// Page (GET)
pub async fn index() -> impl IntoResponse {
    IndexTemplate::new(String::new(), "", "")
}

// "Check now" submission (POST)
pub async fn check(State(state): State<Arc<AppState>>, Form(form): Form<CheckForm>) -> Response {
    match state.classifier.check(&form.message) {
        Ok(verdict) if verdict.is_spam() => {
            IndexTemplate::new(form.message, "error", SPAM_NOTICE).into_response()
        }
        Ok(_) => IndexTemplate::new(form.message, "success", NOT_SPAM_NOTICE).into_response(),
        Err(ClassifierError::EmptyInput) => {
            IndexTemplate::new(form.message, "warning", EMPTY_NOTICE).into_response()
        }
        Err(e) => {
            error!("Failed to check message: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                IndexTemplate::new(form.message, "failure", FAILURE_NOTICE),
            )
                .into_response()
        }
    }
}
