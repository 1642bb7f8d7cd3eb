//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every error renders as `{"error": {"code", "message", "details"?}}`.
//! Field errors travel in `details`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hce_forms::{FieldErrors, UnknownForm};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    pub message: String,
    /// Field → message map for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown route parameter such as a form name (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// One or more fields failed validation (422).
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The downstream relay did not deliver (502).
    #[error("{0}")]
    BadGateway(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "RELAY_FAILED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = self.to_string();

        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<UnknownForm> for AppError {
    fn from(err: UnknownForm) -> Self {
        Self::NotFound(err.to_string())
    }
}
