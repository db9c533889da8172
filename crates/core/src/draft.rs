//! The operator-owned draft record.

/// The mutable record being composed by the operator.
///
/// All three fields are held as plain strings: the draft mirrors the form
/// fields exactly, and nothing is validated until a submit is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DraftRecord {
    /// Patient phone-number identifier (expected: 10 decimal digits).
    pub phone_number: String,
    /// Record-type classification (wire name from the selector).
    pub record_type: String,
    /// Free-text clinical content.
    pub content: String,
}

impl DraftRecord {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the fields that a successful submission consumes.
    ///
    /// The phone number is deliberately preserved so an operator entering
    /// several records for the same patient does not have to retype it.
    pub fn clear_after_success(&mut self) {
        self.record_type.clear();
        self.content.clear();
    }

    /// Clears every field, including the phone number.
    pub fn clear(&mut self) {
        self.phone_number.clear();
        self.record_type.clear();
        self.content.clear();
    }
}
