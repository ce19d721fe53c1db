//! Flow verification against the backend's stored executions.

use std::collections::HashSet;

use crate::models::{Execution, VerificationResult};

/// Provider ids that must be present for a first-broker-login flow to be
/// considered valid. The domain-validation script step is conditional on
/// input and therefore never required here.
pub const REQUIRED_PROVIDERS: [&str; 2] = ["idp-auto-link", "identity-provider-review-profile"];

/// Compare the executions reported by the backend against the required set.
///
/// `None` means the flow does not exist in the realm. Missing providers are
/// listed in the declaration order of [`REQUIRED_PROVIDERS`] so messages
/// stay deterministic. Extra executions do not invalidate the flow.
#[must_use]
pub fn evaluate(flow_alias: &str, executions: Option<&[Execution]>) -> VerificationResult {
    let Some(executions) = executions else {
        return VerificationResult {
            success: false,
            message: format!("Flow '{flow_alias}' not found."),
        };
    };

    let present: HashSet<&str> = executions
        .iter()
        .map(|execution| execution.provider_id.as_str())
        .collect();

    let missing: Vec<&str> = REQUIRED_PROVIDERS
        .iter()
        .copied()
        .filter(|provider| !present.contains(provider))
        .collect();

    if missing.is_empty() {
        VerificationResult {
            success: true,
            message: "Flow is valid.".to_string(),
        }
    } else {
        VerificationResult {
            success: false,
            message: format!(
                "Flow '{flow_alias}' is missing required executions: {}",
                missing.join(", ")
            ),
        }
    }
}
