//! # Identity Provider Contract
//!
//! The external managed identity service behind login and registration.
//! Session and token handling stay inside the provider; this crate only
//! sees whether a session exists and when that changes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Provider-issued proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Profile metadata stored with a new account.
///
/// `sala` and `turma` are `None` unless `is_student` is set, and serialize
/// as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub name: String,
    pub is_student: bool,
    pub sala: Option<String>,
    pub turma: Option<String>,
}

/// A registration request.
///
/// Custom `Debug` implementation redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Where the confirmation link lands.
    pub email_redirect_to: String,
    pub metadata: SignUpMetadata,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("email_redirect_to", &self.email_redirect_to)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Called with the new session (or `None` after sign-out) on every change.
pub type SessionCallback = Arc<dyn Fn(Option<Session>) + Send + Sync>;

/// Handle to a session-change subscription.
///
/// Dropping the handle unsubscribes. [`Subscription::unsubscribe`] does the
/// same explicitly.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap the provider-specific release action.
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Adapter trait for the managed identity service.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe so the live
/// provider and test doubles are interchangeable at runtime.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), ProviderError>;

    /// Create an account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ProviderError>;

    /// The current session, if any.
    async fn get_session(&self) -> Option<Session>;

    /// Register for session changes. The callback may fire from any task.
    fn on_session_change(&self, callback: SessionCallback) -> Subscription;
}
