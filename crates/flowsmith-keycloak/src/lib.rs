//! Keycloak admin REST client for authentication-flow management.
//!
//! Implements the [`flowsmith_flows::FlowBackend`] seam over Keycloak's
//! admin API: flow submission and execution listing, with bearer or
//! client-credentials authentication.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{KeycloakAuth, KeycloakCredentials};
pub use client::KeycloakClient;
pub use error::{KeycloakError, KeycloakResult};
