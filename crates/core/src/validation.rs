//! The draft validation pipeline.
//!
//! Pure and synchronous: validation never touches the upload service and has
//! no side effects, so it can be re-run on every submit attempt.

use crate::draft::DraftRecord;
use crate::error::ValidationError;
use prs_types::PhoneNumber;

/// Minimum content length, in characters, after trimming whitespace.
const MIN_CONTENT_LEN: usize = 10;

/// Validates a draft ahead of submission.
///
/// Rules are applied in order and the first failure wins:
///
/// 1. the phone number must be exactly 10 decimal digits,
/// 2. a record type must be selected (any non-empty value from the trusted
///    selector is accepted, not just the built-in list),
/// 3. the content must be at least 10 characters after trimming.
///
/// Anything else is accepted as-is: interior whitespace is preserved and no
/// upper bound is placed on content length.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule that fails.
pub fn validate(draft: &DraftRecord) -> Result<(), ValidationError> {
    if PhoneNumber::new(&draft.phone_number).is_err() {
        return Err(ValidationError::InvalidPhoneNumber);
    }

    if draft.record_type.is_empty() {
        return Err(ValidationError::MissingRecordType);
    }

    if draft.content.trim().chars().count() < MIN_CONTENT_LEN {
        return Err(ValidationError::ContentTooShort);
    }

    Ok(())
}
