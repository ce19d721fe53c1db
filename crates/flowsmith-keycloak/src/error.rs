//! Error types for the Keycloak admin client.

use flowsmith_flows::FlowError;
use thiserror::Error;

/// Result type for Keycloak client operations.
pub type KeycloakResult<T> = Result<T, KeycloakError>;

/// Errors from the Keycloak admin API.
#[derive(Debug, Error)]
pub enum KeycloakError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication against Keycloak failed: {0}")]
    Auth(String),

    #[error("Keycloak API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<KeycloakError> for FlowError {
    fn from(err: KeycloakError) -> Self {
        match err {
            KeycloakError::Api { status, body } => FlowError::BackendRejected {
                status,
                message: body,
            },
            other => FlowError::Backend(other.to_string()),
        }
    }
}
