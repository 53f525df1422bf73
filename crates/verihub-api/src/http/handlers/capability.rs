//! Capability listing and execution handlers.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;

use verihub_core::capability::Params;
use verihub_types::manifest::CapabilityInfo;
use verihub_types::outcome::Outcome;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/capabilities - List every registered capability.
///
/// The listing reflects a single atomically-observed registry snapshot and
/// is sorted by name.
pub async fn list_capabilities(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<CapabilityInfo>>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let capabilities = state.dispatcher.list();
    let elapsed = start.elapsed().as_millis() as u64;

    Json(ApiResponse::success(capabilities, request_id, elapsed))
}

/// GET /api/v1/capabilities/:name - Introspect one capability.
pub async fn get_capability(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CapabilityInfo>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let info = state.dispatcher.get(&name)?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(Json(ApiResponse::success(info, request_id, elapsed)))
}

/// POST /api/v1/capabilities/:name - Execute a capability.
///
/// The request body is the parameter map (`{}` for none). A capability that
/// returns a malformed value still responds 200 with an `error`-status
/// outcome; only an invocation that fails outright becomes an HTTP error.
pub async fn execute_capability(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(params): Json<Params>,
) -> Result<Json<ApiResponse<Outcome>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let outcome = state.dispatcher.execute(&name, params).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    tracing::info!(
        capability = %name,
        status = ?outcome.status,
        elapsed_ms = elapsed,
        "verification executed"
    );

    Ok(Json(ApiResponse::success(outcome, request_id, elapsed)))
}
