//! Submission attempts and the token that keeps them single-flight.

use crate::draft::DraftRecord;
use crate::upload::UploadRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Identifies which dispatched attempt is the current one.
///
/// Tokens are issued from a monotonically increasing counter. A resolution
/// carrying a token that is no longer current belongs to a superseded attempt
/// and is discarded on arrival; this comparison is the workflow's only
/// concurrency control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AttemptToken(u64);

impl AttemptToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value, for logging.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// One dispatched submission: a draft snapshot plus its origin and timing.
///
/// Owned by the controller for the attempt's lifetime and discarded once an
/// outcome is reached.
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    id: Uuid,
    token: AttemptToken,
    record: UploadRecord,
}

impl SubmissionAttempt {
    pub(crate) fn new(
        token: AttemptToken,
        draft: &DraftRecord,
        hospital_id: Option<String>,
        dispatched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            record: UploadRecord {
                hospital_id,
                phone_number: draft.phone_number.clone(),
                record_type: draft.record_type.clone(),
                content: draft.content.clone(),
                timestamp: dispatched_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }

    /// Correlation id for log lines about this attempt.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The token that must still be current for this attempt's result to
    /// apply.
    pub fn token(&self) -> AttemptToken {
        self.token
    }

    /// The payload to hand to the upload service.
    pub fn record(&self) -> &UploadRecord {
        &self.record
    }
}
