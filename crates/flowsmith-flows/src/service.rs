//! Flow service orchestrating build, submission, and verification.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::builder::build_first_broker_login;
use crate::error::FlowResult;
use crate::models::{Execution, FlowConfig, FlowDefinition, VerificationResult};
use crate::verifier;

/// Seam to the identity backend that stores flow definitions.
///
/// The backend owns the authoritative flow state; the core never caches it.
/// Timeouts and retries are the implementor's concern.
#[async_trait]
pub trait FlowBackend: Send + Sync {
    /// Push a flow definition to the backend. Submitting an existing alias
    /// replaces it (a backend property, not a guarantee made here).
    async fn submit_flow(&self, realm: &str, flow: &FlowDefinition) -> FlowResult<()>;

    /// Fetch the executions currently stored for a flow.
    ///
    /// `Ok(None)` means the flow does not exist in the realm.
    async fn fetch_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> FlowResult<Option<Vec<Execution>>>;
}

/// Stateless orchestrator over a [`FlowBackend`].
#[derive(Clone)]
pub struct FlowService {
    backend: Arc<dyn FlowBackend>,
}

impl FlowService {
    #[must_use]
    pub fn new(backend: Arc<dyn FlowBackend>) -> Self {
        Self { backend }
    }

    /// Build the first-broker-login flow for the realm, submit it to the
    /// backend, and return the definition.
    ///
    /// The returned definition is the one that was submitted; backend
    /// failures propagate as errors rather than being swallowed.
    #[instrument(skip(self, config), fields(domains = config.approved_domains.len()))]
    pub async fn create_flow(
        &self,
        realm: &str,
        config: &FlowConfig,
    ) -> FlowResult<FlowDefinition> {
        let flow = build_first_broker_login(config);
        tracing::info!(
            realm = %realm,
            alias = %flow.alias,
            executions = flow.executions.len(),
            "Submitting first-broker-login flow"
        );
        self.backend.submit_flow(realm, &flow).await?;
        Ok(flow)
    }

    /// Verify that a flow exists in the realm and contains the required
    /// executions.
    ///
    /// A missing flow or missing executions is a normal `success: false`
    /// result; only backend I/O failures are errors.
    #[instrument(skip(self))]
    pub async fn verify_flow(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> FlowResult<VerificationResult> {
        let executions = self.backend.fetch_executions(realm, flow_alias).await?;
        let result = verifier::evaluate(flow_alias, executions.as_deref());
        tracing::debug!(
            realm = %realm,
            flow_alias = %flow_alias,
            success = result.success,
            "Flow verification completed"
        );
        Ok(result)
    }
}
