//! Router for the flows API.

use axum::{
    routing::{get, post},
    Router,
};

use flowsmith_flows::FlowService;

use crate::handlers;

/// Shared state for flow handlers.
#[derive(Clone)]
pub struct FlowsState {
    /// Flow build/submit/verify orchestrator.
    pub flows: FlowService,
}

impl FlowsState {
    #[must_use]
    pub fn new(flows: FlowService) -> Self {
        Self { flows }
    }
}

/// Create the flow management routes.
///
/// Routes:
/// - POST /realms/:realm_name/flows - Create/replace the first-broker-login flow
/// - GET /realms/:realm_name/flows/:flow_alias/verify - Verify a deployed flow
pub fn flow_routes() -> Router<FlowsState> {
    Router::new()
        .route("/realms/:realm_name/flows", post(handlers::create_flow))
        .route(
            "/realms/:realm_name/flows/:flow_alias/verify",
            get(handlers::verify_flow),
        )
}

/// Create the full flows router with state applied.
pub fn create_flows_router(state: FlowsState) -> Router {
    Router::new().merge(flow_routes()).with_state(state)
}
