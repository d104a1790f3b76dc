// One module per endpoint. Handlers validate input and make a single port call.

pub mod apply;
pub mod chat;
pub mod checkout;
pub mod contact;
pub mod enrich;
pub mod health;
pub mod itinerary;

use crate::utils::error::SiteError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

impl StatusMessage {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Malformed or mistyped JSON is a client error (400), not axum's default 415/422.
pub(crate) fn json_rejection(rejection: JsonRejection) -> SiteError {
    SiteError::MalformedBodyError {
        message: rejection.body_text(),
    }
}

/// Router fallback for paths no handler matches.
pub async fn not_found() -> SiteError {
    SiteError::NotFoundError {
        resource: "Route".to_string(),
    }
}

pub async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method not allowed" })),
    )
}

/// Strips line breaks so user input cannot spill into mail headers.
pub(crate) fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}
