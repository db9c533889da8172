//! # PRS Types
//!
//! Small validated value types shared across the PRS workspace.
//!
//! These types guarantee their invariants at construction time so that
//! downstream code never has to re-check them.

use std::str::FromStr;

/// Errors that can occur when creating validated value types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The input was not exactly 10 ASCII decimal digits
    #[error("phone number must be exactly 10 digits")]
    InvalidPhoneNumber,
    /// The input did not name a known record type
    #[error("unknown record type: '{0}'")]
    UnknownRecordType(String),
}

/// A patient phone-number identifier: exactly 10 ASCII decimal digits.
///
/// No separators, no country code. This is the patient-lookup key used by the
/// record repository, not a dialable number, so no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new `PhoneNumber` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(PhoneNumber)` if the input is exactly 10 decimal digits,
    /// or `Err(TypeError::InvalidPhoneNumber)` otherwise.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let s = input.as_ref();
        if s.len() != 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidPhoneNumber);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The closed set of record-type classifications offered by the selector.
///
/// The wire representation is the snake_case name (e.g. `lab_results`).
/// Note that the submission workflow deliberately accepts any non-empty
/// record-type string from a trusted caller; this enum is the canonical
/// selector list, not a validation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    MedicalHistory,
    LabResults,
    Medication,
    SurgicalProcedure,
    Imaging,
    Diagnosis,
}

impl RecordType {
    /// All record types, in the order the selector presents them.
    pub const ALL: [RecordType; 6] = [
        RecordType::MedicalHistory,
        RecordType::LabResults,
        RecordType::Medication,
        RecordType::SurgicalProcedure,
        RecordType::Imaging,
        RecordType::Diagnosis,
    ];

    /// Returns the snake_case wire name for this record type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::MedicalHistory => "medical_history",
            RecordType::LabResults => "lab_results",
            RecordType::Medication => "medication",
            RecordType::SurgicalProcedure => "surgical_procedure",
            RecordType::Imaging => "imaging",
            RecordType::Diagnosis => "diagnosis",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = TypeError;

    /// Parses a snake_case wire name into a `RecordType`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::UnknownRecordType`] if the string does not name a
    /// known record type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medical_history" => Ok(RecordType::MedicalHistory),
            "lab_results" => Ok(RecordType::LabResults),
            "medication" => Ok(RecordType::Medication),
            "surgical_procedure" => Ok(RecordType::SurgicalProcedure),
            "imaging" => Ok(RecordType::Imaging),
            "diagnosis" => Ok(RecordType::Diagnosis),
            other => Err(TypeError::UnknownRecordType(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_accepts_ten_digits() {
        let phone = PhoneNumber::new("5551234567").expect("should accept 10 digits");
        assert_eq!(phone.as_str(), "5551234567");
    }

    #[test]
    fn test_phone_number_rejects_short_input() {
        let err = PhoneNumber::new("555123").expect_err("should reject 6 digits");
        assert!(matches!(err, TypeError::InvalidPhoneNumber));
    }

    #[test]
    fn test_phone_number_rejects_long_input() {
        let err = PhoneNumber::new("55512345678").expect_err("should reject 11 digits");
        assert!(matches!(err, TypeError::InvalidPhoneNumber));
    }

    #[test]
    fn test_phone_number_rejects_separators() {
        assert!(PhoneNumber::new("555-123-4567").is_err());
        assert!(PhoneNumber::new("555 123 456").is_err());
        assert!(PhoneNumber::new("+4455512345").is_err());
    }

    #[test]
    fn test_phone_number_rejects_non_ascii_digits() {
        // U+0660 ARABIC-INDIC DIGIT ZERO is numeric but not an ASCII digit.
        assert!(PhoneNumber::new("٠551234567").is_err());
    }

    #[test]
    fn test_record_type_round_trips_wire_names() {
        for rt in RecordType::ALL {
            assert_eq!(rt.as_str().parse::<RecordType>().expect("round trip"), rt);
        }
    }

    #[test]
    fn test_record_type_rejects_unknown_name() {
        let err = "biopsy".parse::<RecordType>().expect_err("should reject");
        assert!(matches!(err, TypeError::UnknownRecordType(name) if name == "biopsy"));
    }

    #[test]
    fn test_record_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&RecordType::LabResults).expect("serialize");
        assert_eq!(json, "\"lab_results\"");
    }
}
