//! # Form Phases
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──Ok (auth)──────▶ Idle
//!                              │
//!                              ├──Ok (contact)──▶ SuccessPause ──pause elapsed──▶ Idle (reset)
//!                              │
//!                              └──Failed────────▶ Idle (values kept)
//! ```
//!
//! The phase is a runtime enum with validated transitions. Every accepted
//! transition is appended to the controller's log.

use std::fmt;

use hce_core::error::StateError;
use hce_core::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle phase of a mounted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormPhase {
    /// Editable; the submit control is enabled.
    Idle,
    /// A submission is in flight; the submit control is disabled.
    Submitting,
    /// Contact form only: the success panel is showing.
    SuccessPause,
}

impl FormPhase {
    /// Whether `self -> to` is an edge of the machine.
    pub fn can_transition_to(&self, to: FormPhase) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Submitting)
                | (Self::Submitting, Self::Idle)
                | (Self::Submitting, Self::SuccessPause)
                | (Self::SuccessPause, Self::Idle)
        )
    }

    /// Whether a new submission may start from this phase.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Submitting => "SUBMITTING",
            Self::SuccessPause => "SUCCESS_PAUSE",
        };
        f.write_str(s)
    }
}

/// Record of a phase transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: FormPhase,
    pub to: FormPhase,
    /// When the transition occurred (UTC).
    pub timestamp: Timestamp,
    /// Why the transition happened.
    pub reason: String,
}

/// Errors raised by the form controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The requested transition is not allowed from the current phase.
    #[error("invalid form transition: {from} -> {to}")]
    InvalidTransition {
        /// Current phase.
        from: FormPhase,
        /// Attempted target phase.
        to: FormPhase,
    },

    /// The form was unmounted and accepts no further submissions.
    #[error("form {form_id} is unmounted")]
    Unmounted { form_id: String },
}

impl From<ControllerError> for StateError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::InvalidTransition { from, to } => StateError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
                reason: "transition not allowed from current phase".to_string(),
            },
            ControllerError::Unmounted { form_id } => StateError::InvalidTransition {
                from: "UNMOUNTED".to_string(),
                to: FormPhase::Submitting.to_string(),
                reason: format!("form {form_id} is unmounted"),
            },
        }
    }
}
