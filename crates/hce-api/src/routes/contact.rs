//! # Contact API
//!
//! **POST `/v1/contact`**: validate a contact request and hand it to the
//! configured relay.
//!
//! | Result | Status |
//! |---|---|
//! | field errors | 422, errors in `details` |
//! | relayed | 202 `{"status": "accepted"}` |
//! | relay failed | 502 |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use hce_adapter::{ContactSubmission, Submission, SubmissionOutcome};
use hce_core::FieldValues;
use hce_forms::{contact_schema, validate, ValidationResult};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Accepted contact request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactAccepted {
    pub status: String,
}

/// Build the contact router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/contact", post(submit_contact))
}

async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<FieldValues>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactAccepted>), AppError> {
    let values = match validate(&contact_schema(), &extract_json(body)?) {
        ValidationResult::Valid(values) => values,
        ValidationResult::Invalid(errors) => return Err(AppError::Validation(errors)),
    };

    let submission = ContactSubmission::new(state.relay.clone());
    let outcome = submission.submit(&values).await;
    state.feedback.notify(submission.copy().notice_for(&outcome));

    match outcome {
        SubmissionOutcome::Ok { .. } => Ok((
            StatusCode::ACCEPTED,
            Json(ContactAccepted {
                status: "accepted".to_string(),
            }),
        )),
        SubmissionOutcome::Failed { message, .. } => Err(AppError::BadGateway(message)),
    }
}
