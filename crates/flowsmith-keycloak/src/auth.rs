//! Keycloak admin authentication — static bearer token or `OAuth2` client
//! credentials against the realm token endpoint.

use crate::error::{KeycloakError, KeycloakResult};
use reqwest::RequestBuilder;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Credentials for the Keycloak admin API.
///
/// The [`Debug`] impl redacts tokens and secrets to prevent accidental
/// credential exposure in log output.
#[derive(Clone)]
pub enum KeycloakCredentials {
    /// Static bearer token (useful for tests and short-lived tooling).
    Bearer { token: String },

    /// `OAuth2` client credentials grant against the realm token endpoint,
    /// e.g. `http://keycloak:8080/realms/master/protocol/openid-connect/token`.
    ClientCredentials {
        client_id: String,
        client_secret: String,
        token_url: String,
    },
}

impl std::fmt::Debug for KeycloakCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::ClientCredentials {
                client_id,
                token_url,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .field("token_url", token_url)
                .finish(),
        }
    }
}

/// Token response from the Keycloak token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Cached access token with expiry.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<std::time::Instant>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => std::time::Instant::now() >= exp,
            None => false,
        }
    }
}

/// Authentication handler for the Keycloak admin API.
///
/// Client-credentials tokens are cached until shortly before expiry; the
/// cache is shared across clones.
#[derive(Debug, Clone)]
pub struct KeycloakAuth {
    credentials: KeycloakCredentials,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    http_client: reqwest::Client,
}

impl KeycloakAuth {
    /// Create a new auth handler.
    #[must_use]
    pub fn new(credentials: KeycloakCredentials, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Get the bearer token to use for admin requests.
    pub async fn bearer_token(&self) -> KeycloakResult<String> {
        match &self.credentials {
            KeycloakCredentials::Bearer { token } => Ok(token.clone()),
            KeycloakCredentials::ClientCredentials {
                client_id,
                client_secret,
                token_url,
            } => {
                {
                    let cache = self.cached_token.read().await;
                    if let Some(cached) = cache.as_ref() {
                        if !cached.is_expired() {
                            return Ok(cached.access_token.clone());
                        }
                    }
                }

                debug!("Fetching admin access token from {}", token_url);
                let response = self
                    .http_client
                    .post(token_url)
                    .form(&[
                        ("grant_type", "client_credentials"),
                        ("client_id", client_id.as_str()),
                        ("client_secret", client_secret.as_str()),
                    ])
                    .send()
                    .await
                    .map_err(|e| KeycloakError::Auth(format!("token request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<no body>".to_string());
                    return Err(KeycloakError::Auth(format!(
                        "token endpoint returned {status}: {body}"
                    )));
                }

                let token_response: TokenResponse = response.json().await.map_err(|e| {
                    KeycloakError::Auth(format!("failed to parse token response: {e}"))
                })?;

                let expires_at = token_response.expires_in.map(|secs| {
                    // Expire 30 seconds early to avoid using a stale token.
                    std::time::Instant::now()
                        + std::time::Duration::from_secs(secs.saturating_sub(30))
                });

                let access_token = token_response.access_token.clone();

                {
                    let mut cache = self.cached_token.write().await;
                    *cache = Some(CachedToken {
                        access_token: token_response.access_token,
                        expires_at,
                    });
                }

                Ok(access_token)
            }
        }
    }

    /// Apply authentication to a request builder.
    pub async fn apply(&self, builder: RequestBuilder) -> KeycloakResult<RequestBuilder> {
        let token = self.bearer_token().await?;
        Ok(builder.bearer_auth(token))
    }

    /// Invalidate the cached token (e.g. after a 401 response).
    pub async fn invalidate_cache(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}
