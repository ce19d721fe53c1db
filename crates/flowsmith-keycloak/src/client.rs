//! Keycloak admin HTTP client (reqwest-based).
//!
//! Talks to the admin REST API for authentication-flow management and
//! implements [`FlowBackend`] so the core can submit and inspect flows
//! without knowing about HTTP.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use flowsmith_flows::{Execution, FlowBackend, FlowDefinition, FlowResult};

use crate::auth::KeycloakAuth;
use crate::error::{KeycloakError, KeycloakResult};

/// Keycloak admin API client.
#[derive(Debug, Clone)]
pub struct KeycloakClient {
    /// Base URL of the Keycloak server (e.g. "<http://keycloak:8080>").
    base_url: String,
    auth: KeycloakAuth,
    http_client: Client,
}

impl KeycloakClient {
    /// Create a new client with its own HTTP client and timeout.
    pub fn new(base_url: String, auth: KeycloakAuth, timeout: Duration) -> KeycloakResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent("flowsmith-keycloak/0.1")
            .build()
            .map_err(|e| {
                KeycloakError::InvalidConfig(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(base_url, auth, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(base_url: String, auth: KeycloakAuth, http_client: Client) -> Self {
        // Normalize base URL: strip trailing slash.
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            auth,
            http_client,
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create or replace an authentication flow in a realm.
    pub async fn create_flow(&self, realm: &str, flow: &FlowDefinition) -> KeycloakResult<()> {
        let url = format!(
            "{}/admin/realms/{realm}/authentication/flows",
            self.base_url
        );
        debug!(realm = %realm, alias = %flow.alias, "Submitting authentication flow");

        let builder = self.http_client.post(&url).json(flow);
        let builder = self.auth.apply(builder).await?;
        let response = builder.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate_cache().await;
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        warn!(realm = %realm, status = %status, "Flow submission rejected");
        Err(KeycloakError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch the executions of a flow, or `None` if the flow does not exist.
    pub async fn flow_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> KeycloakResult<Option<Vec<Execution>>> {
        let url = format!(
            "{}/admin/realms/{realm}/authentication/flows/{flow_alias}/executions",
            self.base_url
        );
        debug!(realm = %realm, flow_alias = %flow_alias, "Fetching flow executions");

        let builder = self.http_client.get(&url);
        let builder = self.auth.apply(builder).await?;
        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.auth.invalidate_cache().await;
            }
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(KeycloakError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let executions: Vec<Execution> = response.json().await?;
        Ok(Some(executions))
    }
}

#[async_trait]
impl FlowBackend for KeycloakClient {
    async fn submit_flow(&self, realm: &str, flow: &FlowDefinition) -> FlowResult<()> {
        self.create_flow(realm, flow).await.map_err(Into::into)
    }

    async fn fetch_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> FlowResult<Option<Vec<Execution>>> {
        self.flow_executions(realm, flow_alias)
            .await
            .map_err(Into::into)
    }
}
