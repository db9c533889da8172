//! Request/response DTOs for the submission endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Partial update of the draft record: only the provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DraftUpdateReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The draft as currently held by the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftRes {
    pub phone_number: String,
    pub record_type: String,
    pub content: String,
}

/// Result of a submit action.
///
/// `status` is one of `succeeded`, `failed`, `invalid`, `already_submitting`
/// or `superseded`; `message` carries the failure or validation reason where
/// one exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitRes {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Current workflow state plus the draft, for rendering.
///
/// `state` is one of `idle`, `submitting`, `succeeded` or `failed`;
/// `failure_reason` is set only when `state` is `failed`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StateRes {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub draft: DraftRes,
}

/// The record-type selector list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordTypesRes {
    pub record_types: Vec<String>,
}
