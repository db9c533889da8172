//! Error taxonomy for the submission workflow.
//!
//! Two families of failure exist and they are deliberately kept apart:
//! validation errors are local and never reach the upload service; transport
//! errors come back from the upload service and leave the draft untouched so
//! the operator can correct and resubmit.

/// A reason the current draft cannot be submitted.
///
/// The `Display` strings are the exact operator-facing messages surfaced
/// inline by the form; do not reword them without updating the UI copy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The phone number is not exactly 10 decimal digits.
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhoneNumber,
    /// No record type was chosen.
    #[error("Please select a record type")]
    MissingRecordType,
    /// The clinical content is under 10 characters after trimming.
    #[error("Patient data too short...")]
    ContentTooShort,
}

/// An error reported by the upload service for a dispatched attempt.
///
/// The workflow treats the upload service as opaque, so the only structure
/// preserved here is a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TransportError {
    reason: String,
}

impl TransportError {
    /// Creates a new `TransportError` with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the human-readable failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
