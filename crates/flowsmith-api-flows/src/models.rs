//! Request and response models for the flows API.

use flowsmith_flows::FlowConfig;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /realms/{realm_name}/flows`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlowRequest {
    /// Email domains allowed through first-broker-login. Absent or empty
    /// disables domain restriction.
    #[serde(default)]
    pub approved_domains: Vec<String>,

    /// Legacy field from earlier API versions; accepted and ignored.
    #[serde(default)]
    pub flow_type: Option<String>,
}

impl CreateFlowRequest {
    /// Convert into the core flow configuration, dropping legacy fields.
    #[must_use]
    pub fn into_flow_config(self) -> FlowConfig {
        FlowConfig {
            approved_domains: self.approved_domains,
        }
    }
}

/// Body of the verify endpoint responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyFlowResponse {
    /// "success" or "error".
    pub status: String,
    pub message: String,
}
