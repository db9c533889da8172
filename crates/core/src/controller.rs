//! The submission state machine.
//!
//! `SubmissionController` is a plain reducer: every transition is a
//! synchronous method on explicit state, so the machine can be unit-tested
//! deterministically without a rendering environment or an async runtime.
//! The async plumbing around the upload call lives in
//! [`crate::service::SubmissionService`].

use crate::attempt::{AttemptToken, SubmissionAttempt};
use crate::draft::DraftRecord;
use crate::error::{TransportError, ValidationError};
use crate::validation::validate;
use chrono::{DateTime, Utc};

/// The controller's single source of truth.
///
/// `Succeeded` and `Failed` are transient display states; a new submit or a
/// reset supersedes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl WorkflowState {
    /// Whether an attempt is currently in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting)
    }
}

/// What a submit action turned into.
#[derive(Debug)]
pub enum SubmitDisposition {
    /// The draft validated; this attempt is now in flight and must be handed
    /// to the upload service.
    Dispatch(SubmissionAttempt),
    /// An attempt is already in flight; the action is a no-op.
    Rejected,
    /// Validation failed; the state moved to `Failed` locally and the upload
    /// service was not contacted.
    Invalid(ValidationError),
}

/// The applied outcome of a resolved attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(String),
}

/// Owns the draft and the workflow state and applies all transitions.
#[derive(Debug)]
pub struct SubmissionController {
    draft: DraftRecord,
    state: WorkflowState,
    issued_tokens: u64,
    current_attempt: Option<AttemptToken>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    /// Creates a controller with an empty draft in the `Idle` state.
    pub fn new() -> Self {
        Self {
            draft: DraftRecord::new(),
            state: WorkflowState::Idle,
            issued_tokens: 0,
            current_attempt: None,
        }
    }

    /// The current draft.
    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    /// The current workflow state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        self.draft.phone_number = value.into();
    }

    pub fn set_record_type(&mut self, value: impl Into<String>) {
        self.draft.record_type = value.into();
    }

    pub fn set_content(&mut self, value: impl Into<String>) {
        self.draft.content = value.into();
    }

    /// Attempts to start a submission from the current draft.
    ///
    /// Rejected outright while an attempt is in flight (the single-flight
    /// rule). Otherwise the draft is validated; on failure the state becomes
    /// `Failed` with the validation reason and no attempt is created. On
    /// success a new attempt is snapshotted with the given origin identity
    /// and timestamp, its token becomes current, and the state moves to
    /// `Submitting`.
    ///
    /// # Arguments
    ///
    /// * `hospital_id` - Origin identity read from the hospital context for
    ///   this attempt (read fresh per attempt, `None` before authentication).
    /// * `now` - Dispatch timestamp stamped onto the upload payload.
    pub fn begin_submit(
        &mut self,
        hospital_id: Option<String>,
        now: DateTime<Utc>,
    ) -> SubmitDisposition {
        if self.state.is_submitting() {
            return SubmitDisposition::Rejected;
        }

        if let Err(reason) = validate(&self.draft) {
            self.state = WorkflowState::Failed(reason.to_string());
            return SubmitDisposition::Invalid(reason);
        }

        self.issued_tokens += 1;
        let token = AttemptToken::new(self.issued_tokens);
        let attempt = SubmissionAttempt::new(token, &self.draft, hospital_id, now);

        self.current_attempt = Some(token);
        self.state = WorkflowState::Submitting;
        SubmitDisposition::Dispatch(attempt)
    }

    /// Applies the outcome of a resolved attempt, if it is still current.
    ///
    /// A stale token (one superseded by a newer attempt) returns `None` and
    /// changes nothing. For the current token: success clears the record
    /// type and content, preserves the phone number and moves to
    /// `Succeeded`; failure leaves the draft untouched and moves to
    /// `Failed` with the transport reason.
    pub fn resolve(
        &mut self,
        token: AttemptToken,
        result: Result<(), TransportError>,
    ) -> Option<SubmissionOutcome> {
        if self.current_attempt != Some(token) {
            tracing::debug!(token = token.value(), "dropping stale attempt result");
            return None;
        }
        self.current_attempt = None;

        match result {
            Ok(()) => {
                self.draft.clear_after_success();
                self.state = WorkflowState::Succeeded;
                Some(SubmissionOutcome::Succeeded)
            }
            Err(err) => {
                let reason = err.reason().to_owned();
                self.state = WorkflowState::Failed(reason.clone());
                Some(SubmissionOutcome::Failed(reason))
            }
        }
    }

    /// Returns the controller to `Idle` with a fully cleared draft.
    ///
    /// An attempt already in flight is not cancelled and its token stays
    /// current: the result still applies on arrival unless a newer attempt
    /// supersedes it first.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.state = WorkflowState::Idle;
    }
}
