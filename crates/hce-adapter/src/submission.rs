//! # Submission Adapters
//!
//! One adapter per form purpose, all behind the [`Submission`] contract:
//! take validated values, call the external service, return a
//! [`SubmissionOutcome`]. Adapters never return `Err`; provider and relay
//! failures are classified into the outcome here.
//!
//! Each adapter also owns its form's feedback copy, so the controller can
//! report outcomes without knowing which service it talked to.

use std::sync::Arc;

use async_trait::async_trait;
use hce_core::FieldValues;
use hce_forms::forms::fields;
use hce_forms::FormKind;

use crate::config::AdapterConfig;
use crate::feedback::Notification;
use crate::identity::{IdentityProvider, SignUpMetadata, SignUpRequest};
use crate::outcome::{FailureCategory, SubmissionOutcome};
use crate::relay::{ContactRelay, ContactRequest};

/// Where auth flows land after success.
pub const HOME_PATH: &str = "/";

/// Notification copy for one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackCopy {
    pub success_title: &'static str,
    pub success_description: &'static str,
    /// Title for failures without a dedicated title.
    pub failure_title: &'static str,
}

pub const SIGN_IN_COPY: FeedbackCopy = FeedbackCopy {
    success_title: "Signed in!",
    success_description: "Welcome back to Base HCE.",
    failure_title: "Sign-in failed",
};

pub const SIGN_UP_COPY: FeedbackCopy = FeedbackCopy {
    success_title: "Account created!",
    success_description: "Welcome to Base HCE. Your expedition starts now.",
    failure_title: "Could not create account",
};

pub const CONTACT_COPY: FeedbackCopy = FeedbackCopy {
    success_title: "Message sent!",
    success_description: "We will get back to you soon.",
    failure_title: "Could not send message",
};

impl FeedbackCopy {
    pub fn success_notice(&self) -> Notification {
        Notification::success(self.success_title, self.success_description)
    }

    pub fn failure_notice(&self, category: FailureCategory, message: &str) -> Notification {
        let title = match category {
            FailureCategory::InvalidCredentials => "Invalid credentials",
            FailureCategory::AlreadyRegistered => "Email already registered",
            FailureCategory::NetworkOrUnknown => self.failure_title,
        };
        Notification::failure(title, message)
    }

    /// The notification matching an outcome.
    pub fn notice_for(&self, outcome: &SubmissionOutcome) -> Notification {
        match outcome {
            SubmissionOutcome::Ok { .. } => self.success_notice(),
            SubmissionOutcome::Failed { category, message } => {
                self.failure_notice(*category, message)
            }
        }
    }
}

/// Uniform async contract over the external call behind a form.
#[async_trait]
pub trait Submission: Send + Sync {
    /// The form this adapter submits.
    fn form(&self) -> FormKind;

    fn copy(&self) -> &FeedbackCopy;

    /// Submit validated values.
    async fn submit(&self, values: &FieldValues) -> SubmissionOutcome;
}

fn log_outcome(form: FormKind, outcome: &SubmissionOutcome) {
    match outcome {
        SubmissionOutcome::Ok { redirect } => tracing::info!(
            form = %form,
            redirect = redirect.as_deref().unwrap_or("-"),
            "submission accepted"
        ),
        SubmissionOutcome::Failed { category, .. } => tracing::warn!(
            form = %form,
            category = %category,
            "submission failed"
        ),
    }
}

/// Email/password sign-in.
pub struct SignInSubmission {
    provider: Arc<dyn IdentityProvider>,
}

impl SignInSubmission {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Submission for SignInSubmission {
    fn form(&self) -> FormKind {
        FormKind::Login
    }

    fn copy(&self) -> &FeedbackCopy {
        &SIGN_IN_COPY
    }

    async fn submit(&self, values: &FieldValues) -> SubmissionOutcome {
        let outcome = match self
            .provider
            .sign_in_with_password(values.text(fields::EMAIL), values.text(fields::PASSWORD))
            .await
        {
            Ok(()) => SubmissionOutcome::redirect_to(HOME_PATH),
            Err(e) => SubmissionOutcome::from(&e),
        };
        log_outcome(self.form(), &outcome);
        outcome
    }
}

/// Account registration, with the student section when checked.
pub struct SignUpSubmission {
    provider: Arc<dyn IdentityProvider>,
    email_redirect_to: String,
}

impl SignUpSubmission {
    pub fn new(provider: Arc<dyn IdentityProvider>, config: &AdapterConfig) -> Self {
        Self {
            provider,
            email_redirect_to: config.email_redirect_to(),
        }
    }

    /// The provider request for validated registration values.
    pub fn request_for(&self, values: &FieldValues) -> SignUpRequest {
        let is_student = values.flag(fields::IS_STUDENT);
        let class_field = |name: &str| {
            if is_student {
                values.optional_text(name).map(str::to_string)
            } else {
                None
            }
        };
        SignUpRequest {
            email: values.text(fields::EMAIL).to_string(),
            password: values.text(fields::PASSWORD).to_string(),
            email_redirect_to: self.email_redirect_to.clone(),
            metadata: SignUpMetadata {
                name: values.text(fields::NAME).to_string(),
                is_student,
                sala: class_field(fields::SALA),
                turma: class_field(fields::TURMA),
            },
        }
    }
}

#[async_trait]
impl Submission for SignUpSubmission {
    fn form(&self) -> FormKind {
        FormKind::Register
    }

    fn copy(&self) -> &FeedbackCopy {
        &SIGN_UP_COPY
    }

    async fn submit(&self, values: &FieldValues) -> SubmissionOutcome {
        let request = self.request_for(values);
        let outcome = match self.provider.sign_up(&request).await {
            Ok(()) => SubmissionOutcome::redirect_to(HOME_PATH),
            Err(e) => SubmissionOutcome::from(&e),
        };
        log_outcome(self.form(), &outcome);
        outcome
    }
}

/// Contact request delivery.
pub struct ContactSubmission {
    relay: Arc<dyn ContactRelay>,
}

impl ContactSubmission {
    pub fn new(relay: Arc<dyn ContactRelay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl Submission for ContactSubmission {
    fn form(&self) -> FormKind {
        FormKind::Contact
    }

    fn copy(&self) -> &FeedbackCopy {
        &CONTACT_COPY
    }

    async fn submit(&self, values: &FieldValues) -> SubmissionOutcome {
        let request = ContactRequest::from_values(values);
        let outcome = match self.relay.relay(&request).await {
            Ok(()) => SubmissionOutcome::ok(),
            Err(e) => {
                tracing::warn!(relay = self.relay.relay_name(), error = %e, "contact relay failed");
                SubmissionOutcome::from(&e)
            }
        };
        log_outcome(self.form(), &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, RelayError};
    use crate::identity::{Session, SessionCallback, Subscription};
    use crate::outcome::{ALREADY_REGISTERED_MESSAGE, FALLBACK_MESSAGE};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct FakeProvider {
        reject_with: Option<ProviderError>,
        sign_ins: Mutex<Vec<(String, String)>>,
        sign_ups: Mutex<Vec<SignUpRequest>>,
    }

    impl FakeProvider {
        fn result(&self) -> Result<(), ProviderError> {
            match &self.reject_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<(), ProviderError> {
            self.sign_ins.lock().push((email.to_string(), password.to_string()));
            self.result()
        }

        async fn sign_up(&self, request: &SignUpRequest) -> Result<(), ProviderError> {
            self.sign_ups.lock().push(request.clone());
            self.result()
        }

        async fn get_session(&self) -> Option<Session> {
            None
        }

        fn on_session_change(&self, _callback: SessionCallback) -> Subscription {
            Subscription::noop()
        }
    }

    struct FailingRelay;

    #[async_trait]
    impl ContactRelay for FailingRelay {
        async fn relay(&self, _request: &ContactRequest) -> Result<(), RelayError> {
            Err(RelayError::Unavailable {
                reason: "smtp down".to_string(),
            })
        }

        fn relay_name(&self) -> &str {
            "FailingRelay"
        }
    }

    fn registration(is_student: bool) -> FieldValues {
        FieldValues::new()
            .with(fields::NAME, "Jo")
            .with(fields::EMAIL, "jo@x.com")
            .with(fields::PASSWORD, "123456")
            .with(fields::IS_STUDENT, is_student)
            .with(fields::SALA, "1")
            .with(fields::TURMA, "A")
    }

    #[tokio::test]
    async fn sign_in_success_redirects_home() {
        let provider = Arc::new(FakeProvider::default());
        let adapter = SignInSubmission::new(provider.clone());
        let values = FieldValues::new()
            .with(fields::EMAIL, "ok@x.com")
            .with(fields::PASSWORD, "123456");
        let outcome = adapter.submit(&values).await;
        assert_eq!(outcome, SubmissionOutcome::redirect_to("/"));
        assert_eq!(
            provider.sign_ins.lock().as_slice(),
            &[("ok@x.com".to_string(), "123456".to_string())]
        );
    }

    #[tokio::test]
    async fn already_registered_is_classified() {
        let provider = Arc::new(FakeProvider {
            reject_with: Some(ProviderError::Rejected {
                message: "User already registered".to_string(),
            }),
            ..Default::default()
        });
        let adapter = SignUpSubmission::new(provider, &AdapterConfig::default());
        let outcome = adapter.submit(&registration(false)).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::failed(FailureCategory::AlreadyRegistered, ALREADY_REGISTERED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn sign_up_sends_class_only_for_students() {
        let provider = Arc::new(FakeProvider::default());
        let adapter = SignUpSubmission::new(provider.clone(), &AdapterConfig::default());
        adapter.submit(&registration(true)).await;
        adapter.submit(&registration(false)).await;

        let sent = provider.sign_ups.lock();
        assert_eq!(sent[0].metadata.sala.as_deref(), Some("1"));
        assert_eq!(sent[0].metadata.turma.as_deref(), Some("A"));
        assert!(sent[0].metadata.is_student);
        assert_eq!(sent[1].metadata.sala, None);
        assert_eq!(sent[1].metadata.turma, None);
        assert_eq!(sent[1].email_redirect_to, "http://localhost:8080/");
    }

    #[tokio::test]
    async fn relay_failure_degrades_to_fallback() {
        let adapter = ContactSubmission::new(Arc::new(FailingRelay));
        let outcome = adapter.submit(&FieldValues::new()).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::failed(FailureCategory::NetworkOrUnknown, FALLBACK_MESSAGE)
        );
    }

    #[test]
    fn failure_titles_follow_category() {
        let n = SIGN_IN_COPY.failure_notice(FailureCategory::InvalidCredentials, "m");
        assert_eq!(n.title, "Invalid credentials");
        let n = SIGN_UP_COPY.failure_notice(FailureCategory::NetworkOrUnknown, "m");
        assert_eq!(n.title, SIGN_UP_COPY.failure_title);
        assert_eq!(n.description, "m");
    }
}
