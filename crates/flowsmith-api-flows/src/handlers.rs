//! Handlers for flow creation and verification.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use flowsmith_flows::FlowDefinition;

use crate::error::FlowApiResult;
use crate::models::{CreateFlowRequest, VerifyFlowResponse};
use crate::router::FlowsState;

/// Create or replace the first-broker-login flow in a realm.
#[utoipa::path(
    post,
    path = "/realms/{realm_name}/flows",
    params(
        ("realm_name" = String, Path, description = "Realm to configure"),
    ),
    request_body = CreateFlowRequest,
    responses(
        (status = 201, description = "Flow submitted to the identity backend", body = FlowDefinition),
        (status = 502, description = "Identity backend unavailable or rejected the flow"),
    ),
    tag = "Flows"
)]
#[instrument(skip(state, body))]
pub async fn create_flow(
    State(state): State<FlowsState>,
    Path(realm_name): Path<String>,
    body: Option<Json<CreateFlowRequest>>,
) -> FlowApiResult<impl IntoResponse> {
    // The body is optional; no body means no domain restriction.
    let request = body.map(|Json(request)| request).unwrap_or_default();

    tracing::info!(
        realm = %realm_name,
        approved_domains = request.approved_domains.len(),
        "Creating first-broker-login flow"
    );

    let config = request.into_flow_config();
    let flow = state.flows.create_flow(&realm_name, &config).await?;

    Ok((StatusCode::CREATED, Json(flow)))
}

/// Verify that a flow was applied to a realm.
///
/// A missing flow or missing executions is a 400 with `status: "error"`;
/// only backend I/O failures produce a 5xx.
#[utoipa::path(
    get,
    path = "/realms/{realm_name}/flows/{flow_alias}/verify",
    params(
        ("realm_name" = String, Path, description = "Realm to inspect"),
        ("flow_alias" = String, Path, description = "Alias of the flow to verify"),
    ),
    responses(
        (status = 200, description = "Flow is valid", body = VerifyFlowResponse),
        (status = 400, description = "Flow missing or incomplete", body = VerifyFlowResponse),
        (status = 502, description = "Identity backend unavailable"),
    ),
    tag = "Flows"
)]
#[instrument(skip(state))]
pub async fn verify_flow(
    State(state): State<FlowsState>,
    Path((realm_name, flow_alias)): Path<(String, String)>,
) -> FlowApiResult<impl IntoResponse> {
    let result = state.flows.verify_flow(&realm_name, &flow_alias).await?;

    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    let body = VerifyFlowResponse {
        status: if result.success { "success" } else { "error" }.to_string(),
        message: result.message,
    };

    Ok((status, Json(body)))
}
