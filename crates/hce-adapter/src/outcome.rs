//! # Submission Outcomes and Failure Classification
//!
//! Every submission ends in a [`SubmissionOutcome`]. Failures carry one of
//! three categories and the message shown to the user.
//!
//! Provider error text is classified by substring in
//! [`classify_provider_error`], the only place that inspects it. Text that
//! matches neither known phrase degrades to `NetworkOrUnknown` and is shown
//! as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, RelayError};

const INVALID_CREDENTIALS_PHRASE: &str = "Invalid login credentials";
const ALREADY_REGISTERED_PHRASE: &str = "already registered";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Wrong email or password. Check and try again.";
pub const ALREADY_REGISTERED_MESSAGE: &str = "This email is already registered. Try signing in.";
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Why a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    InvalidCredentials,
    AlreadyRegistered,
    NetworkOrUnknown,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidCredentials => "invalid-credentials",
            Self::AlreadyRegistered => "already-registered",
            Self::NetworkOrUnknown => "network-or-unknown",
        };
        f.write_str(s)
    }
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Accepted. Auth flows carry the path to navigate to.
    Ok { redirect: Option<String> },
    /// Refused or not delivered. Field values are kept.
    Failed {
        category: FailureCategory,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn ok() -> Self {
        Self::Ok { redirect: None }
    }

    pub fn redirect_to(target: impl Into<String>) -> Self {
        Self::Ok {
            redirect: Some(target.into()),
        }
    }

    pub fn failed(category: FailureCategory, message: impl Into<String>) -> Self {
        Self::Failed {
            category,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Map a provider error to a failure category and user message.
pub fn classify_provider_error(err: &ProviderError) -> (FailureCategory, String) {
    let text = match err.provider_message() {
        Some(text) => text,
        None => return (FailureCategory::NetworkOrUnknown, FALLBACK_MESSAGE.to_string()),
    };

    if text.contains(INVALID_CREDENTIALS_PHRASE) {
        (
            FailureCategory::InvalidCredentials,
            INVALID_CREDENTIALS_MESSAGE.to_string(),
        )
    } else if text.contains(ALREADY_REGISTERED_PHRASE) {
        (
            FailureCategory::AlreadyRegistered,
            ALREADY_REGISTERED_MESSAGE.to_string(),
        )
    } else if text.trim().is_empty() {
        (FailureCategory::NetworkOrUnknown, FALLBACK_MESSAGE.to_string())
    } else {
        (FailureCategory::NetworkOrUnknown, text.to_string())
    }
}

impl From<&ProviderError> for SubmissionOutcome {
    fn from(err: &ProviderError) -> Self {
        let (category, message) = classify_provider_error(err);
        Self::Failed { category, message }
    }
}

impl From<&RelayError> for SubmissionOutcome {
    fn from(_: &RelayError) -> Self {
        Self::failed(FailureCategory::NetworkOrUnknown, FALLBACK_MESSAGE)
    }
}
