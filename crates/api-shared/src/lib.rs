//! # API Shared
//!
//! Shared definitions for the PRS REST surface.
//!
//! Contains:
//! - Request/response DTOs for the submission endpoints (`records` module)
//! - Shared services like `HealthService`
//!
//! The DTOs are deliberately plain-string shaped: conversions to and from the
//! core workflow types happen at the handler boundary.

pub mod health;
pub mod records;

pub use health::HealthService;
pub use records::*;
