//! Flow data model shared by the builder, verifier, and backend client.
//!
//! Serialization matches the wire format the identity backend expects
//! (camelCase keys, SCREAMING_SNAKE_CASE requirement levels).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Requirement level of an execution within a flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirement {
    Required,
    Alternative,
    #[default]
    Disabled,
    Conditional,
}

/// Named configuration blob attached to a script-executing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthenticationConfig {
    /// Human-readable name of the config entry.
    pub alias: String,
    /// Key/value payload. A `BTreeMap` keeps serialization deterministic.
    pub config: BTreeMap<String, String>,
}

/// One step in an authentication flow.
///
/// Backend execution listings omit fields the verifier does not inspect, so
/// everything except `providerId` deserializes from a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// When/whether this step runs.
    #[serde(default)]
    pub requirement: Requirement,
    /// Identifier of the authentication mechanism, e.g. `idp-auto-link`.
    pub provider_id: String,
    /// Execution order within the flow; lower runs first.
    #[serde(default)]
    pub priority: i32,
    /// Present only on script-executing steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_config: Option<AuthenticationConfig>,
}

/// The aggregate flow definition submitted to the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FlowDefinition {
    /// Unique flow name, e.g. `first-broker-login`.
    pub alias: String,
    /// Flow kind; `basic-flow` for this use case.
    pub provider_id: String,
    /// True for flows the backend can invoke directly.
    pub top_level: bool,
    pub description: String,
    /// Ordered by ascending priority; order is execution order.
    pub executions: Vec<Execution>,
}

/// Input configuration for flow creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig {
    /// Email domains allowed through first-broker-login. Empty means no
    /// domain restriction. Duplicates are passed through unchanged.
    #[serde(default)]
    pub approved_domains: Vec<String>,
}

/// Outcome of comparing a stored flow against the required executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VerificationResult {
    pub success: bool,
    pub message: String,
}
