//! Error types for flow operations.

use thiserror::Error;

/// Result type for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors surfaced by flow creation and verification.
///
/// Logical verification failures (flow absent, executions missing) are not
/// errors; they come back as a [`crate::models::VerificationResult`] with
/// `success: false`.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The backend could not be reached or the response could not be read.
    #[error("backend request failed: {0}")]
    Backend(String),

    /// The backend answered with a non-success status.
    #[error("backend rejected request ({status}): {message}")]
    BackendRejected { status: u16, message: String },
}
