//! # hce-adapter: External Collaborator Boundary
//!
//! Contracts for the services the forms core calls into, and the adapters
//! that turn a validated form into a call on one of them:
//!
//! - [`IdentityProvider`]: sign-in, sign-up, session lookup and session
//!   change subscriptions.
//! - [`ContactRelay`]: contact request delivery, simulated by default.
//! - [`FeedbackSink`] and [`Navigator`]: user-facing notifications and
//!   post-success redirection.
//!
//! ## Architecture
//!
//! Every trait is `Send + Sync` and object-safe. Async methods go through
//! `async-trait` so implementations can sit behind `Arc<dyn _>` and be
//! swapped at runtime (live provider vs. test double).
//!
//! Provider error text is only ever inspected by
//! [`outcome::classify_provider_error`].

pub mod config;
pub mod error;
pub mod feedback;
pub mod identity;
pub mod outcome;
pub mod relay;
pub mod submission;

pub use config::AdapterConfig;
pub use error::{ConfigError, ProviderError, RelayError};
pub use feedback::{FeedbackSink, Navigator, Notification, NotificationVariant, TracingFeedback};
pub use identity::{IdentityProvider, Session, SessionCallback, SignUpMetadata, SignUpRequest, Subscription};
pub use outcome::{classify_provider_error, FailureCategory, SubmissionOutcome};
pub use relay::{ContactRelay, ContactRequest, SimulatedRelay};
pub use submission::{
    ContactSubmission, FeedbackCopy, SignInSubmission, SignUpSubmission, Submission,
};
