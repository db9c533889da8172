//! The upload-service boundary.
//!
//! The remote health-record repository is opaque to this crate: encryption,
//! wire format, retries and persistence are its concern. The workflow only
//! needs an asynchronous call that eventually resolves to an outcome.

use crate::error::TransportError;

/// The payload dispatched to the upload service for one submission attempt.
///
/// This is a snapshot: it is taken from the draft at dispatch time and is not
/// affected by later edits or resets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UploadRecord {
    /// Identity of the submitting hospital, if the context had resolved one.
    pub hospital_id: Option<String>,
    /// Patient phone-number identifier.
    pub phone_number: String,
    /// Record-type classification.
    pub record_type: String,
    /// Free-text clinical content.
    pub content: String,
    /// Submission timestamp, RFC 3339 / ISO 8601.
    pub timestamp: String,
}

/// Asynchronous access to the remote record repository.
///
/// A call, once dispatched, always runs to completion; the workflow offers no
/// cancellation primitive and instead discards stale results on arrival.
pub trait UploadService {
    /// Submits one record and resolves with the remote outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the repository rejects the record or
    /// cannot be reached.
    fn submit(
        &self,
        record: &UploadRecord,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_record_wire_shape() {
        let record = UploadRecord {
            hospital_id: Some("hosp-42".into()),
            phone_number: "5551234567".into(),
            record_type: "diagnosis".into(),
            content: "Type 2 diabetes, newly diagnosed.".into(),
            timestamp: "2026-03-14T09:26:53.000Z".into(),
        };

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "hospital_id": "hosp-42",
                "phone_number": "5551234567",
                "record_type": "diagnosis",
                "content": "Type 2 diabetes, newly diagnosed.",
                "timestamp": "2026-03-14T09:26:53.000Z",
            })
        );
    }

    #[test]
    fn test_upload_record_keeps_null_hospital_id() {
        // An unauthenticated context still submits; the origin is null, not
        // omitted, so the repository can distinguish "unknown" from "absent
        // field".
        let record = UploadRecord {
            hospital_id: None,
            phone_number: "5551234567".into(),
            record_type: "imaging".into(),
            content: "Chest X-ray clear.".into(),
            timestamp: "2026-03-14T09:26:53.000Z".into(),
        };

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["hospital_id"], serde_json::Value::Null);
    }
}
