//! Test doubles for the collaborator traits.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hce_adapter::submission::SIGN_IN_COPY;
use hce_adapter::{
    FeedbackCopy, FeedbackSink, IdentityProvider, Navigator, Notification, ProviderError, Session,
    SessionCallback, SignUpRequest, Submission, SubmissionOutcome, Subscription,
};
use hce_core::FieldValues;
use hce_forms::FormKind;
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
pub struct RecordingFeedback {
    notes: Mutex<Vec<Notification>>,
}

impl RecordingFeedback {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notes.lock().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, notification: Notification) {
        self.notes.lock().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.targets.lock().push(target.to_string());
    }
}

type Subscribers = Arc<Mutex<BTreeMap<u64, SessionCallback>>>;

/// In-memory identity provider with a scripted response.
#[derive(Default)]
pub struct FakeProvider {
    reject_with: Option<String>,
    session: Option<Session>,
    subscribers: Subscribers,
    next_id: AtomicU64,
    pub sign_in_calls: AtomicUsize,
    pub sign_up_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn rejecting(message: &str) -> Self {
        Self {
            reject_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
            ..Default::default()
        }
    }

    /// Deliver a session change to every subscriber.
    pub fn emit(&self, session: Option<Session>) {
        let callbacks: Vec<SessionCallback> = self.subscribers.lock().values().cloned().collect();
        for callback in callbacks {
            callback(session.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn result(&self) -> Result<(), ProviderError> {
        match &self.reject_with {
            Some(message) => Err(ProviderError::Rejected {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<(), ProviderError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn sign_up(&self, _request: &SignUpRequest) -> Result<(), ProviderError> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn get_session(&self) -> Option<Session> {
        self.session.clone()
    }

    fn on_session_change(&self, callback: SessionCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers.lock().insert(id, callback);
        let subscribers = self.subscribers.clone();
        Subscription::new(move || {
            subscribers.lock().remove(&id);
        })
    }
}

/// Submission that blocks until released, counting calls.
pub struct GatedSubmission {
    kind: FormKind,
    gate: Notify,
    pub calls: AtomicUsize,
}

impl GatedSubmission {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Submission for GatedSubmission {
    fn form(&self) -> FormKind {
        self.kind
    }

    fn copy(&self) -> &FeedbackCopy {
        &SIGN_IN_COPY
    }

    async fn submit(&self, _values: &FieldValues) -> SubmissionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        SubmissionOutcome::redirect_to("/")
    }
}

/// Submission whose adapter call panics.
pub struct PanickingSubmission {
    pub calls: AtomicUsize,
}

impl PanickingSubmission {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Submission for PanickingSubmission {
    fn form(&self) -> FormKind {
        FormKind::Login
    }

    fn copy(&self) -> &FeedbackCopy {
        &SIGN_IN_COPY
    }

    async fn submit(&self, _values: &FieldValues) -> SubmissionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("identity provider client crashed");
    }
}
