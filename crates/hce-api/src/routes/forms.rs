//! # Form Validation API
//!
//! - **GET `/v1/forms/catalog`**: contact form option lists.
//! - **POST `/v1/forms/{form}/validate`**: validate a flat JSON value set
//!   against `login`, `register` or `contact`.
//!
//! Validation runs the same schemas as the interactive forms. Valid input
//! answers 200 with the coerced values; invalid input answers 422 with the
//! field → message map. Password values are never echoed back.

use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use hce_core::FieldValues;
use hce_forms::{validate, ContactCatalog, FormKind, ValidationReport};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Build the forms router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/forms/catalog", get(catalog))
        .route("/v1/forms/{form}/validate", post(validate_form))
}

async fn catalog() -> Json<ContactCatalog> {
    Json(ContactCatalog::get())
}

async fn validate_form(
    Path(form): Path<String>,
    body: Result<Json<FieldValues>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidationReport>), AppError> {
    let kind: FormKind = form.parse()?;
    let values = extract_json(body)?;
    let schema = kind.schema();

    let report = ValidationReport::new(&schema, validate(&schema, &values));
    let status = if report.valid {
        StatusCode::OK
    } else {
        tracing::debug!(form = %kind, errors = ?report.errors, "validation failed");
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(report)))
}
