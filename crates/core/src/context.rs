//! The acting hospital's identity.
//!
//! The hospital context is an explicit dependency handed to the workflow at
//! construction rather than ambient global state, so tests can run without an
//! authentication environment.

/// Read-only access to the identity of the hospital operating the form.
pub trait HospitalContext {
    /// Returns the current hospital id, or `None` if authentication has not
    /// completed yet.
    ///
    /// The workflow reads this once per submit attempt and never caches it
    /// across attempts, so a context that resolves late is picked up by the
    /// next submission.
    fn hospital_id(&self) -> Option<String>;
}

/// A context with a fixed, optionally absent, hospital id.
#[derive(Debug, Clone, Default)]
pub struct FixedHospitalContext {
    hospital_id: Option<String>,
}

impl FixedHospitalContext {
    /// Creates a context that always reports the given hospital id.
    pub fn new(hospital_id: impl Into<String>) -> Self {
        Self {
            hospital_id: Some(hospital_id.into()),
        }
    }

    /// Creates a context for which authentication never completes.
    pub fn unresolved() -> Self {
        Self { hospital_id: None }
    }
}

impl HospitalContext for FixedHospitalContext {
    fn hospital_id(&self) -> Option<String> {
        self.hospital_id.clone()
    }
}
