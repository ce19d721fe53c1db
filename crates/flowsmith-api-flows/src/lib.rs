//! HTTP API for realm authentication-flow management.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

pub use error::{FlowApiError, FlowApiResult};
pub use router::{create_flows_router, flow_routes, FlowsState};
