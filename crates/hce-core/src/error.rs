//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types shared across the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Field validation failures never travel through this type; they live
//!   in the per-field error map and are reported as data, not errors.
//! - State machine errors include the current state and the attempted
//!   transition.

use thiserror::Error;

/// Top-level error type for the HCE forms core.
#[derive(Error, Debug)]
pub enum HceError {
    /// State machine transition rejected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// An unknown form name was requested.
    #[error("unknown form: {0}")]
    UnknownForm(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error in state machine transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Attempted an invalid state transition.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// Current state name.
        from: String,
        /// Attempted target state name.
        to: String,
        /// Reason the transition was rejected.
        reason: String,
    },
}

impl From<StateError> for HceError {
    fn from(err: StateError) -> Self {
        HceError::InvalidTransition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_error_display_names_both_states() {
        let err = StateError::InvalidTransition {
            from: "SUBMITTING".to_string(),
            to: "SUBMITTING".to_string(),
            reason: "submission already in flight".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SUBMITTING"));
        assert!(msg.contains("already in flight"));
    }

    #[test]
    fn state_error_converts_into_hce_error() {
        let err: HceError = StateError::InvalidTransition {
            from: "IDLE".to_string(),
            to: "SUCCESS_PAUSE".to_string(),
            reason: "no outcome".to_string(),
        }
        .into();
        assert!(matches!(err, HceError::InvalidTransition(_)));
    }

    #[test]
    fn serde_error_converts_into_hce_error() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: HceError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("serialization error"));
    }
}
