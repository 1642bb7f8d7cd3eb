//! # hce-state: Form Controller and Session Guard
//!
//! Runtime state for mounted forms.
//!
//! - **Form controller** (`controller.rs`): values, per-field errors and
//!   the `Idle → Submitting → Idle | SuccessPause` phase machine with its
//!   transition log. At most one submission in flight per form.
//!
//! - **Session guard** (`session.rs`): redirects away from the auth page
//!   while a session exists, for as long as the guard lives.
//!
//! ## Design
//!
//! Phases are a runtime enum with validated transitions rather than
//! typestate: the controller is shared behind an `Arc` and driven by UI
//! events, so the phase is only known at runtime. Rejected transitions
//! surface as `ControllerError` and leave the form unchanged.

pub mod controller;
pub mod phase;
pub mod session;

#[cfg(test)]
mod test_support;

pub use controller::{FormController, SubmitResult};
pub use phase::{ControllerError, FormPhase, PhaseTransition};
pub use session::SessionGuard;
