//! Async submission service.
//!
//! `SubmissionService` wraps the [`SubmissionController`] reducer with the
//! three external collaborators and drives one submit action end to end. The
//! controller lock is never held across the upload await, so the form stays
//! responsive (reads, edits and resets proceed) while an attempt is in
//! flight.

use crate::attempt::SubmissionAttempt;
use crate::context::HospitalContext;
use crate::controller::{
    SubmissionController, SubmissionOutcome, SubmitDisposition, WorkflowState,
};
use crate::draft::DraftRecord;
use crate::notify::{Notification, NotificationSink};
use crate::upload::UploadService;
use chrono::Utc;
use tokio::sync::Mutex;

/// Operator-facing message for a successful submission.
const SUBMIT_SUCCESS_MESSAGE: &str = "Patient record submitted successfully";

/// What a driven submit action reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    /// The attempt resolved affirmatively.
    Succeeded,
    /// The attempt resolved with a transport failure.
    Failed(String),
    /// The draft failed validation; nothing was dispatched.
    Invalid(String),
    /// Another attempt was already in flight; nothing was dispatched.
    AlreadySubmitting,
    /// The attempt resolved but had been superseded; its result was dropped.
    Superseded,
}

/// A point-in-time view of the workflow for rendering.
#[derive(Debug, Clone)]
pub struct WorkflowSnapshot {
    pub state: WorkflowState,
    pub draft: DraftRecord,
}

/// Drives the submission workflow against injected collaborators.
pub struct SubmissionService<U, N, C> {
    controller: Mutex<SubmissionController>,
    upload: U,
    notifier: N,
    context: C,
}

impl<U, N, C> SubmissionService<U, N, C>
where
    U: UploadService,
    N: NotificationSink,
    C: HospitalContext,
{
    /// Creates a service with an empty draft in the `Idle` state.
    ///
    /// # Arguments
    ///
    /// * `upload` - The upload service the attempts are dispatched to.
    /// * `notifier` - Sink for outcome notifications (fire-and-forget).
    /// * `context` - Source of the acting hospital's identity, read once per
    ///   attempt.
    pub fn new(upload: U, notifier: N, context: C) -> Self {
        Self {
            controller: Mutex::new(SubmissionController::new()),
            upload,
            notifier,
            context,
        }
    }

    /// Runs one submit action to its terminal outcome.
    ///
    /// Validates the current draft, dispatches at most one attempt, awaits
    /// the upload service and applies the result through the controller. A
    /// result arriving for a superseded attempt is dropped and reported as
    /// [`SubmitReport::Superseded`].
    pub async fn submit(&self) -> SubmitReport {
        let attempt: SubmissionAttempt = {
            let mut controller = self.controller.lock().await;
            let hospital_id = self.context.hospital_id();
            match controller.begin_submit(hospital_id, Utc::now()) {
                SubmitDisposition::Dispatch(attempt) => attempt,
                SubmitDisposition::Rejected => {
                    tracing::warn!("submit ignored: an attempt is already in flight");
                    return SubmitReport::AlreadySubmitting;
                }
                SubmitDisposition::Invalid(reason) => {
                    let message = reason.to_string();
                    tracing::info!(%message, "submit blocked by validation");
                    self.notifier.notify(Notification::error(message.clone()));
                    return SubmitReport::Invalid(message);
                }
            }
        };

        tracing::info!(
            attempt_id = %attempt.id(),
            token = attempt.token().value(),
            hospital_id = attempt.record().hospital_id.as_deref().unwrap_or("-"),
            record_type = %attempt.record().record_type,
            "dispatching record submission"
        );

        let result = self.upload.submit(attempt.record()).await;

        let mut controller = self.controller.lock().await;
        match controller.resolve(attempt.token(), result) {
            Some(SubmissionOutcome::Succeeded) => {
                tracing::info!(attempt_id = %attempt.id(), "submission succeeded");
                self.notifier
                    .notify(Notification::success(SUBMIT_SUCCESS_MESSAGE));
                SubmitReport::Succeeded
            }
            Some(SubmissionOutcome::Failed(reason)) => {
                tracing::warn!(attempt_id = %attempt.id(), %reason, "submission failed");
                self.notifier.notify(Notification::error(reason.clone()));
                SubmitReport::Failed(reason)
            }
            None => {
                tracing::debug!(attempt_id = %attempt.id(), "attempt superseded; result dropped");
                SubmitReport::Superseded
            }
        }
    }

    /// Resets the workflow: clears the whole draft and returns to `Idle`.
    ///
    /// Does not cancel an in-flight attempt; see
    /// [`SubmissionController::reset`].
    pub async fn reset(&self) {
        self.controller.lock().await.reset();
    }

    pub async fn set_phone_number(&self, value: impl Into<String>) {
        self.controller.lock().await.set_phone_number(value);
    }

    pub async fn set_record_type(&self, value: impl Into<String>) {
        self.controller.lock().await.set_record_type(value);
    }

    pub async fn set_content(&self, value: impl Into<String>) {
        self.controller.lock().await.set_content(value);
    }

    /// Takes a snapshot of the current state and draft for rendering.
    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let controller = self.controller.lock().await;
        WorkflowSnapshot {
            state: controller.state().clone(),
            draft: controller.draft().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixedHospitalContext;
    use crate::error::TransportError;
    use crate::notify::Severity;
    use crate::upload::UploadRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::sync::Notify;

    /// Upload stub that records every dispatched payload and optionally
    /// holds the attempt in flight until released.
    struct StubUpload {
        calls: StdMutex<Vec<UploadRecord>>,
        result: StdMutex<Result<(), TransportError>>,
        gate: Option<Arc<Notify>>,
    }

    impl StubUpload {
        fn succeeding() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                result: StdMutex::new(Ok(())),
                gate: None,
            }
        }

        fn failing(reason: &str) -> Self {
            let stub = Self::succeeding();
            *stub.result.lock().unwrap() = Err(TransportError::new(reason));
            stub
        }

        fn gated(gate: Arc<Notify>) -> Self {
            let mut stub = Self::succeeding();
            stub.gate = Some(gate);
            stub
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl UploadService for &StubUpload {
        fn submit(
            &self,
            record: &UploadRecord,
        ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send {
            self.calls.lock().unwrap().push(record.clone());
            let result = self.result.lock().unwrap().clone();
            let gate = self.gate.clone();
            async move {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                result
            }
        }
    }

    /// Sink that records every delivered notification.
    #[derive(Default)]
    struct RecordingSink {
        delivered: StdMutex<Vec<Notification>>,
    }

    impl NotificationSink for &RecordingSink {
        fn notify(&self, notification: Notification) {
            self.delivered.lock().unwrap().push(notification);
        }
    }

    /// Context that counts how often the hospital id is read.
    struct CountingContext {
        reads: AtomicUsize,
    }

    impl CountingContext {
        fn new() -> Self {
            Self {
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl HospitalContext for &CountingContext {
        fn hospital_id(&self) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Some("hosp-1".into())
        }
    }

    async fn fill_valid_draft<U, N, C>(service: &SubmissionService<U, N, C>)
    where
        U: UploadService,
        N: NotificationSink,
        C: HospitalContext,
    {
        service.set_phone_number("5551234567").await;
        service.set_record_type("lab_results").await;
        service.set_content("Blood panel normal.").await;
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let upload = StubUpload::succeeding();
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::new("hosp-1"));
        fill_valid_draft(&service).await;

        let report = service.submit().await;
        assert_eq!(report, SubmitReport::Succeeded);
        assert_eq!(upload.call_count(), 1);

        let dispatched = upload.calls.lock().unwrap()[0].clone();
        assert_eq!(dispatched.hospital_id.as_deref(), Some("hosp-1"));
        assert_eq!(dispatched.phone_number, "5551234567");
        assert_eq!(dispatched.record_type, "lab_results");
        assert_eq!(dispatched.content, "Blood panel normal.");

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.state, WorkflowState::Succeeded);
        assert_eq!(snapshot.draft.phone_number, "5551234567");
        assert_eq!(snapshot.draft.record_type, "");
        assert_eq!(snapshot.draft.content, "");

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_submit_invalid_draft_never_reaches_upload() {
        let upload = StubUpload::succeeding();
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::unresolved());
        service.set_phone_number("555123").await;

        let report = service.submit().await;
        assert_eq!(
            report,
            SubmitReport::Invalid("Please enter a valid 10-digit phone number".into())
        );
        assert_eq!(upload.call_count(), 0);

        let snapshot = service.snapshot().await;
        assert_eq!(
            snapshot.state,
            WorkflowState::Failed("Please enter a valid 10-digit phone number".into())
        );

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_submit_transport_failure_preserves_draft() {
        let upload = StubUpload::failing("repository offline");
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::new("hosp-1"));
        fill_valid_draft(&service).await;

        let report = service.submit().await;
        assert_eq!(report, SubmitReport::Failed("repository offline".into()));

        let snapshot = service.snapshot().await;
        assert_eq!(
            snapshot.state,
            WorkflowState::Failed("repository offline".into())
        );
        assert_eq!(snapshot.draft.phone_number, "5551234567");
        assert_eq!(snapshot.draft.record_type, "lab_results");
        assert_eq!(snapshot.draft.content, "Blood panel normal.");

        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].severity, Severity::Error);
        assert_eq!(delivered[0].message, "repository offline");
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_first_in_flight() {
        let gate = Arc::new(Notify::new());
        let upload = StubUpload::gated(gate.clone());
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::new("hosp-1"));
        fill_valid_draft(&service).await;

        let (first, second) = tokio::join!(service.submit(), async {
            let report = service.submit().await;
            gate.notify_one();
            report
        });

        assert_eq!(first, SubmitReport::Succeeded);
        assert_eq!(second, SubmitReport::AlreadySubmitting);
        assert_eq!(upload.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_result_after_reset_and_resubmit_is_superseded() {
        let gate = Arc::new(Notify::new());
        let upload = StubUpload::gated(gate.clone());
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::new("hosp-1"));
        fill_valid_draft(&service).await;

        let (first, second) = tokio::join!(service.submit(), async {
            // Detach from the in-flight attempt, refill, dispatch a newer one.
            service.reset().await;
            fill_valid_draft(&service).await;
            let second = service.submit();
            // Release both flights; the second attempt is now current, so the
            // first result arrives stale.
            gate.notify_one();
            gate.notify_one();
            second.await
        });

        assert_eq!(second, SubmitReport::Succeeded);
        assert_eq!(first, SubmitReport::Superseded);
        assert_eq!(upload.call_count(), 2);

        // Only the surviving attempt notified.
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_hospital_context_read_once_per_attempt() {
        let upload = StubUpload::succeeding();
        let sink = RecordingSink::default();
        let context = CountingContext::new();
        let service = SubmissionService::new(&upload, &sink, &context);
        fill_valid_draft(&service).await;

        service.submit().await;
        assert_eq!(context.reads.load(Ordering::SeqCst), 1);

        service.set_record_type("imaging").await;
        service.set_content("Chest X-ray clear.").await;
        service.submit().await;
        assert_eq!(context.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reset_returns_workflow_to_idle() {
        let upload = StubUpload::failing("busy");
        let sink = RecordingSink::default();
        let service =
            SubmissionService::new(&upload, &sink, FixedHospitalContext::new("hosp-1"));
        fill_valid_draft(&service).await;
        service.submit().await;

        service.reset().await;
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.state, WorkflowState::Idle);
        assert_eq!(snapshot.draft, DraftRecord::new());
    }
}
