use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DraftUpdateReq, DraftRes, HealthRes, HealthService, RecordTypesRes, StateRes, SubmitRes,
};
use prs_core::{
    FixedHospitalContext, LogNotifier, SubmissionService, SubmitReport, TransportError,
    UploadRecord, UploadService, WorkflowSnapshot, WorkflowState,
};
use prs_types::RecordType;

/// Development stand-in for the remote record repository.
///
/// Resolves after a fixed delay, optionally with a forced transport failure
/// for exercising the error path. The real repository (encryption, storage,
/// retry policy) is a separate deployment reached through the same
/// [`UploadService`] seam.
#[derive(Clone)]
struct SimulatedUploadService {
    delay: Duration,
    force_failure: bool,
}

impl UploadService for SimulatedUploadService {
    fn submit(
        &self,
        record: &UploadRecord,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        tracing::debug!(
            record_type = %record.record_type,
            timestamp = %record.timestamp,
            "simulated upload dispatched"
        );
        let delay = self.delay;
        let force_failure = self.force_failure;
        async move {
            tokio::time::sleep(delay).await;
            if force_failure {
                Err(TransportError::new("Upload service unavailable"))
            } else {
                Ok(())
            }
        }
    }
}

type Workflow = SubmissionService<SimulatedUploadService, LogNotifier, FixedHospitalContext>;

/// Application state shared across REST API handlers
///
/// Holds the single submission workflow driven by this process.
#[derive(Clone)]
struct AppState {
    workflow: Arc<Workflow>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, record_types, get_state, update_draft, submit, reset),
    components(schemas(
        HealthRes,
        RecordTypesRes,
        StateRes,
        DraftRes,
        DraftUpdateReq,
        SubmitRes
    ))
)]
struct ApiDoc;

/// Main entry point for the PRS submission service
///
/// Starts the REST server that fronts the record submission workflow.
///
/// # Environment Variables
/// - `PRS_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PRS_HOSPITAL_ID`: Identity stamped onto submissions (unset = not yet
///   authenticated; submissions carry no origin identity)
/// - `PRS_UPLOAD_DELAY_MS`: Simulated upload round-trip time (default: 600)
/// - `PRS_UPLOAD_FAIL`: Set to "1" to force transport failures (dev only)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("prs=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PRS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let hospital_id = std::env::var("PRS_HOSPITAL_ID").ok();
    let delay_ms: u64 = std::env::var("PRS_UPLOAD_DELAY_MS")
        .unwrap_or_else(|_| "600".into())
        .parse()?;
    let force_failure = matches!(
        std::env::var("PRS_UPLOAD_FAIL").as_deref(),
        Ok("1") | Ok("true")
    );

    tracing::info!("++ Starting PRS REST on {}", rest_addr);
    if hospital_id.is_none() {
        tracing::warn!("PRS_HOSPITAL_ID is unset; submissions will carry no origin identity");
    }

    let context = match hospital_id {
        Some(id) => FixedHospitalContext::new(id),
        None => FixedHospitalContext::unresolved(),
    };
    let upload = SimulatedUploadService {
        delay: Duration::from_millis(delay_ms),
        force_failure,
    };
    let workflow = Arc::new(SubmissionService::new(upload, LogNotifier, context));

    let rest_app = Router::new()
        .route("/health", get(health))
        .route("/record-types", get(record_types))
        .route("/state", get(get_state))
        .route("/draft", post(update_draft))
        .route("/submit", post(submit))
        .route("/reset", post(reset))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(AppState { workflow });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, rest_app).await?;

    Ok(())
}

fn state_res(snapshot: WorkflowSnapshot) -> StateRes {
    let (state, failure_reason) = match snapshot.state {
        WorkflowState::Idle => ("idle", None),
        WorkflowState::Submitting => ("submitting", None),
        WorkflowState::Succeeded => ("succeeded", None),
        WorkflowState::Failed(reason) => ("failed", Some(reason)),
    };
    StateRes {
        state: state.into(),
        failure_reason,
        draft: DraftRes {
            phone_number: snapshot.draft.phone_number,
            record_type: snapshot.draft.record_type,
            content: snapshot.draft.content,
        },
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/record-types",
    responses(
        (status = 200, description = "The record-type selector list", body = RecordTypesRes)
    )
)]
/// List the record-type classifications offered by the selector
async fn record_types(State(_state): State<AppState>) -> Json<RecordTypesRes> {
    Json(RecordTypesRes {
        record_types: RecordType::ALL.iter().map(|rt| rt.as_str().into()).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/state",
    responses(
        (status = 200, description = "Current workflow state and draft", body = StateRes)
    )
)]
/// Inspect the current workflow state and draft
async fn get_state(State(state): State<AppState>) -> Json<StateRes> {
    Json(state_res(state.workflow.snapshot().await))
}

#[utoipa::path(
    post,
    path = "/draft",
    request_body = DraftUpdateReq,
    responses(
        (status = 200, description = "Draft updated", body = StateRes)
    )
)]
/// Update draft fields
///
/// Applies a partial update: only the fields present in the request body
/// change. Returns the resulting state and draft.
async fn update_draft(
    State(state): State<AppState>,
    Json(req): Json<DraftUpdateReq>,
) -> Json<StateRes> {
    if let Some(phone_number) = req.phone_number {
        state.workflow.set_phone_number(phone_number).await;
    }
    if let Some(record_type) = req.record_type {
        state.workflow.set_record_type(record_type).await;
    }
    if let Some(content) = req.content {
        state.workflow.set_content(content).await;
    }
    Json(state_res(state.workflow.snapshot().await))
}

#[utoipa::path(
    post,
    path = "/submit",
    responses(
        (status = 200, description = "Submit action outcome", body = SubmitRes)
    )
)]
/// Submit the current draft
///
/// Runs the submit action to its terminal outcome: validation, at most one
/// dispatched attempt, and the applied result. A submit issued while another
/// attempt is in flight reports `already_submitting` without dispatching.
async fn submit(State(state): State<AppState>) -> Json<SubmitRes> {
    let (status, message) = match state.workflow.submit().await {
        SubmitReport::Succeeded => ("succeeded", None),
        SubmitReport::Failed(reason) => ("failed", Some(reason)),
        SubmitReport::Invalid(reason) => ("invalid", Some(reason)),
        SubmitReport::AlreadySubmitting => ("already_submitting", None),
        SubmitReport::Superseded => ("superseded", None),
    };
    Json(SubmitRes {
        status: status.into(),
        message,
    })
}

#[utoipa::path(
    post,
    path = "/reset",
    responses(
        (status = 200, description = "Workflow reset to idle", body = StateRes)
    )
)]
/// Reset the workflow
///
/// Clears the whole draft (including the phone number) and returns the
/// workflow to idle. An in-flight attempt is not cancelled; its result is
/// applied or dropped on arrival per the attempt-token rule.
async fn reset(State(state): State<AppState>) -> Json<StateRes> {
    state.workflow.reset().await;
    Json(state_res(state.workflow.snapshot().await))
}
