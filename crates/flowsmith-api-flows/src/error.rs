//! Error types for the flows API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flowsmith_flows::FlowError;
use serde::Serialize;
use thiserror::Error;

/// Result type for flow handlers.
pub type FlowApiResult<T> = Result<T, FlowApiError>;

/// Errors surfaced by the flows API.
#[derive(Debug, Error)]
pub enum FlowApiError {
    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for FlowApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            FlowApiError::Flow(FlowError::Backend(msg)) => {
                tracing::error!("Identity backend unreachable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "backend_unavailable",
                    "Failed to communicate with the identity backend".to_string(),
                )
            }
            FlowApiError::Flow(FlowError::BackendRejected { status, message }) => {
                // Upstream detail goes to the log, not to the client.
                tracing::error!(
                    upstream_status = status,
                    upstream_body = %message,
                    "Identity backend rejected the request"
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "backend_rejected",
                    "The identity backend rejected the request".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
