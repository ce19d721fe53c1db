//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading: required variables must be present and valid or the
//! application exits with a clear error message.

use std::env;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host, default "0.0.0.0".
    pub host: String,
    /// Bind port, default 8080.
    pub port: u16,
    /// Log filter directive, default "info".
    pub rust_log: String,
    /// Base URL of the Keycloak server, e.g. "http://keycloak:8080".
    pub keycloak_base_url: String,
    /// Client id used for the admin client-credentials grant.
    pub keycloak_admin_client_id: String,
    /// Client secret for the admin client.
    pub keycloak_admin_client_secret: String,
    /// Realm whose token endpoint issues admin tokens, default "master".
    pub keycloak_token_realm: String,
    /// Outbound request timeout in seconds, default 30.
    pub keycloak_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                message: e.to_string(),
            })?,
            Err(_) => 8080,
        };
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let keycloak_base_url = require("KEYCLOAK_BASE_URL")?;
        let keycloak_admin_client_id = require("KEYCLOAK_ADMIN_CLIENT_ID")?;
        let keycloak_admin_client_secret = require("KEYCLOAK_ADMIN_CLIENT_SECRET")?;
        let keycloak_token_realm =
            env::var("KEYCLOAK_TOKEN_REALM").unwrap_or_else(|_| "master".to_string());
        let keycloak_timeout_secs = match env::var("KEYCLOAK_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "KEYCLOAK_TIMEOUT_SECS",
                message: e.to_string(),
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            host,
            port,
            rust_log,
            keycloak_base_url,
            keycloak_admin_client_id,
            keycloak_admin_client_secret,
            keycloak_token_realm,
            keycloak_timeout_secs,
        })
    }

    /// Token endpoint of the realm that issues admin tokens.
    #[must_use]
    pub fn keycloak_token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.keycloak_base_url.trim_end_matches('/'),
            self.keycloak_token_realm
        )
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
