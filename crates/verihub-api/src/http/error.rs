//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use verihub_core::dispatch::ExecuteError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
///
/// Dispatch failures are the only domain errors this API surfaces; body and
/// path rejections are handled by the axum extractors themselves.
#[derive(Debug)]
pub struct AppError(ExecuteError);

impl From<ExecuteError> for AppError {
    fn from(e: ExecuteError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self.0 {
            ExecuteError::NotFound(name) => (
                "CAPABILITY_NOT_FOUND",
                format!("No capability registered with name '{name}'"),
            ),
            ExecuteError::Capability { name, source } => (
                "CAPABILITY_FAILED",
                // {:#} renders the whole cause chain.
                format!("Capability '{name}' failed: {source:#}"),
            ),
        };

        let request_id = uuid::Uuid::now_v7().to_string();
        ApiResponse::error(code, &message, request_id).into_response()
    }
}
