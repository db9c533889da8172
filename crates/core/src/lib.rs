//! # PRS Core
//!
//! Core submission workflow for the PRS patient record system.
//!
//! This crate contains the record submission workflow and nothing else:
//! - the operator-owned [`DraftRecord`] and its validation pipeline
//! - the submit/result state machine ([`SubmissionController`])
//! - the async driver ([`SubmissionService`]) and the collaborator seams it
//!   is constructed over ([`UploadService`], [`NotificationSink`],
//!   [`HospitalContext`])
//!
//! **No API concerns**: HTTP servers, rendering and authentication belong to
//! the callers of this crate.

pub mod attempt;
pub mod context;
pub mod controller;
pub mod draft;
pub mod error;
pub mod notify;
pub mod service;
pub mod upload;
pub mod validation;

pub use attempt::{AttemptToken, SubmissionAttempt};
pub use context::{FixedHospitalContext, HospitalContext};
pub use controller::{SubmissionController, SubmissionOutcome, SubmitDisposition, WorkflowState};
pub use draft::DraftRecord;
pub use error::{TransportError, ValidationError};
pub use notify::{LogNotifier, Notification, NotificationSink, Severity};
pub use service::{SubmissionService, SubmitReport, WorkflowSnapshot};
pub use upload::{UploadRecord, UploadService};
pub use validation::validate;
