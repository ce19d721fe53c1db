//! Health check endpoint.

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Always returns 200 while the process is up; readiness
/// against Keycloak is not checked here because the service holds no
/// connection state of its own.
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
