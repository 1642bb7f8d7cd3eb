//! # Form Controller
//!
//! Holds a mounted form's values, its per-field errors and its phase, and
//! runs validate → submit → report.
//!
//! ## Concurrency
//!
//! State lives behind a `parking_lot::Mutex` that is never held across an
//! `.await`: `submit` validates and enters `Submitting` under the lock,
//! releases it for the adapter call, then re-locks to record the outcome.
//! A second `submit` arriving in between finds the form in `Submitting` and
//! is ignored without touching the adapter.
//!
//! Leaving `Submitting` does not depend on the adapter returning normally.
//! A panicking adapter is reported as a network-or-unknown failure, and a
//! `submit` future dropped mid-flight returns the form to `Idle` with the
//! same fallback notice.
//!
//! The success-pause reset is a spawned task holding only a `Weak`
//! reference. Its handle is stored under the same lock that records the
//! transition, so `unmount()` and `Drop` always see it and abort it.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use hce_adapter::outcome::FALLBACK_MESSAGE;
use hce_adapter::{
    AdapterConfig, FailureCategory, FeedbackSink, Navigator, Submission, SubmissionOutcome,
};
use hce_core::{FieldValue, FieldValues, FormId, Timestamp};
use hce_forms::forms::fields;
use hce_forms::{validate, FieldErrors, FieldSchema, FormKind, ValidationResult};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::phase::{ControllerError, FormPhase, PhaseTransition};

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// The form was not in a phase that accepts submissions. No adapter call.
    Ignored(ControllerError),
    /// Validation failed. The errors are now on the form. No adapter call.
    Rejected(FieldErrors),
    /// The adapter was called and returned this outcome.
    Completed(SubmissionOutcome),
}

struct FormState {
    phase: FormPhase,
    mounted: bool,
    values: FieldValues,
    errors: FieldErrors,
    transitions: Vec<PhaseTransition>,
    reset_task: Option<JoinHandle<()>>,
}

impl FormState {
    fn require_phase(&self, expected: FormPhase, to: FormPhase) -> Result<(), ControllerError> {
        if self.phase != expected || !self.phase.can_transition_to(to) {
            return Err(ControllerError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, form_id: FormId, to: FormPhase, reason: &str) {
        tracing::debug!(form_id = %form_id, from = %self.phase, to = %to, reason, "form transition");
        self.transitions.push(PhaseTransition {
            from: self.phase,
            to,
            timestamp: Timestamp::now(),
            reason: reason.to_string(),
        });
        self.phase = to;
    }
}

/// A mounted form.
pub struct FormController {
    id: FormId,
    kind: FormKind,
    schema: FieldSchema,
    submission: Arc<dyn Submission>,
    feedback: Arc<dyn FeedbackSink>,
    navigator: Arc<dyn Navigator>,
    success_pause: Duration,
    state: Mutex<FormState>,
}

impl FormController {
    /// Mount a form for `submission`'s purpose, starting from schema defaults.
    pub fn new(
        submission: Arc<dyn Submission>,
        feedback: Arc<dyn FeedbackSink>,
        navigator: Arc<dyn Navigator>,
        config: &AdapterConfig,
    ) -> Arc<Self> {
        let kind = submission.form();
        let schema = kind.schema();
        let id = FormId::new();
        tracing::debug!(form_id = %id, form = %kind, "form mounted");
        Arc::new(Self {
            id,
            kind,
            state: Mutex::new(FormState {
                phase: FormPhase::Idle,
                mounted: true,
                values: schema.defaults(),
                errors: FieldErrors::new(),
                transitions: Vec::new(),
                reset_task: None,
            }),
            schema,
            submission,
            feedback,
            navigator,
            success_pause: config.success_pause,
        })
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn phase(&self) -> FormPhase {
        self.state.lock().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    /// Whether the submit control is enabled.
    pub fn is_submit_enabled(&self) -> bool {
        let state = self.state.lock();
        state.mounted && state.phase.accepts_submit()
    }

    /// Snapshot of the current values.
    pub fn values(&self) -> FieldValues {
        self.state.lock().values.clone()
    }

    pub fn value(&self, field: &str) -> Option<FieldValue> {
        self.state.lock().values.get(field).cloned()
    }

    /// Snapshot of the current errors.
    pub fn errors(&self) -> FieldErrors {
        self.state.lock().errors.clone()
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.state.lock().errors.get(field).map(str::to_string)
    }

    /// Whether the student section is showing.
    pub fn is_student(&self) -> bool {
        self.state.lock().values.flag(fields::IS_STUDENT)
    }

    /// Phase transitions so far, oldest first.
    pub fn transitions(&self) -> Vec<PhaseTransition> {
        self.state.lock().transitions.clone()
    }

    /// Change one field's value and clear its error.
    pub fn set_value(&self, field: &str, value: impl Into<FieldValue>) {
        let mut state = self.state.lock();
        state.values.insert(field, value);
        state.errors.remove(field);
    }

    /// Toggle the student section. Unchecking empties `sala` and `turma`.
    pub fn set_student(&self, is_student: bool) {
        let mut state = self.state.lock();
        state.values.insert(fields::IS_STUDENT, is_student);
        state.errors.remove(fields::IS_STUDENT);
        if !is_student {
            for field in [fields::SALA, fields::TURMA] {
                state.values.insert(field, "");
                state.errors.remove(field);
            }
        }
    }

    /// Validate and, when valid, submit.
    ///
    /// Ignored unless the form is `Idle`. Failures of any kind return the
    /// form to `Idle` with its values intact, including an adapter panic or
    /// this future being dropped before the adapter answers.
    pub async fn submit(self: &Arc<Self>) -> SubmitResult {
        let values = match self.begin_submission() {
            Ok(values) => values,
            Err(result) => return result,
        };
        let in_flight = InFlight::arm(self);

        let outcome = match AssertUnwindSafe(self.submission.submit(&values))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(form_id = %self.id, form = %self.kind, "submission adapter panicked");
                fallback_outcome()
            }
        };

        in_flight.complete(&outcome);
        SubmitResult::Completed(outcome)
    }

    fn begin_submission(&self) -> Result<FieldValues, SubmitResult> {
        let mut state = self.state.lock();
        if !state.mounted {
            return Err(SubmitResult::Ignored(ControllerError::Unmounted {
                form_id: self.id.to_string(),
            }));
        }
        if let Err(e) = state.require_phase(FormPhase::Idle, FormPhase::Submitting) {
            tracing::debug!(form_id = %self.id, phase = %state.phase, "submit ignored");
            return Err(SubmitResult::Ignored(e));
        }

        match validate(&self.schema, &state.values) {
            ValidationResult::Invalid(errors) => {
                tracing::debug!(
                    form_id = %self.id,
                    form = %self.kind,
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "validation failed"
                );
                state.errors = errors.clone();
                Err(SubmitResult::Rejected(errors))
            }
            ValidationResult::Valid(values) => {
                state.errors.clear();
                state.do_transition(self.id, FormPhase::Submitting, "submit");
                Ok(values)
            }
        }
    }

    fn finish_submission(self: &Arc<Self>, outcome: &SubmissionOutcome) {
        let (next, reason) = match outcome {
            SubmissionOutcome::Ok { .. } if self.kind.pauses_on_success() => {
                (FormPhase::SuccessPause, "submission accepted".to_string())
            }
            SubmissionOutcome::Ok { .. } => (FormPhase::Idle, "submission accepted".to_string()),
            SubmissionOutcome::Failed { category, .. } => {
                (FormPhase::Idle, format!("submission failed: {category}"))
            }
        };

        {
            let mut state = self.state.lock();
            state.do_transition(self.id, next, &reason);
            if next == FormPhase::SuccessPause && state.mounted {
                let handle = self.spawn_reset();
                if let Some(previous) = state.reset_task.replace(handle) {
                    previous.abort();
                }
            }
        }

        self.feedback.notify(self.submission.copy().notice_for(outcome));
        if let SubmissionOutcome::Ok {
            redirect: Some(target),
        } = outcome
        {
            self.navigator.navigate(target);
        }
    }

    /// The submission ended without an outcome. Back to `Idle` with the
    /// fallback notice.
    fn abandon_submission(&self) {
        {
            let mut state = self.state.lock();
            if state.phase != FormPhase::Submitting {
                return;
            }
            state.do_transition(self.id, FormPhase::Idle, "submission abandoned");
        }
        tracing::warn!(form_id = %self.id, form = %self.kind, "submission abandoned before completion");
        self.feedback.notify(self.submission.copy().notice_for(&fallback_outcome()));
    }

    fn spawn_reset(self: &Arc<Self>) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let pause = self.success_pause;
        tokio::spawn(async move {
            tokio::time::sleep(pause).await;
            if let Some(controller) = weak.upgrade() {
                if let Err(e) = controller.reset_after_pause() {
                    tracing::warn!(form_id = %controller.id, error = %e, "success pause reset skipped");
                }
            }
        })
    }

    /// Leave `SuccessPause`: restore defaults and re-enable the form.
    fn reset_after_pause(&self) -> Result<(), ControllerError> {
        let mut state = self.state.lock();
        state.reset_task.take();
        state.require_phase(FormPhase::SuccessPause, FormPhase::Idle)?;
        state.values = self.schema.defaults();
        state.errors.clear();
        state.do_transition(self.id, FormPhase::Idle, "success pause elapsed");
        Ok(())
    }

    /// Tear the form down. A pending success-pause reset is cancelled and
    /// later submissions are ignored.
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        state.mounted = false;
        if let Some(task) = state.reset_task.take() {
            task.abort();
        }
        tracing::debug!(form_id = %self.id, phase = %state.phase, "form unmounted");
    }
}

fn fallback_outcome() -> SubmissionOutcome {
    SubmissionOutcome::failed(FailureCategory::NetworkOrUnknown, FALLBACK_MESSAGE)
}

/// Armed while the adapter call is outstanding. Dropped without
/// [`InFlight::complete`], it abandons the submission.
struct InFlight<'a> {
    controller: &'a Arc<FormController>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn arm(controller: &'a Arc<FormController>) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn complete(mut self, outcome: &SubmissionOutcome) {
        self.armed = false;
        self.controller.finish_submission(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abandon_submission();
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        if let Some(task) = self.state.get_mut().reset_task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
