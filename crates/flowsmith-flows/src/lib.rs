//! First-broker-login flow generation and verification.
//!
//! The builder deterministically produces a [`models::FlowDefinition`] from a
//! [`models::FlowConfig`]; the verifier compares the executions actually
//! stored by the identity backend against the required backbone. All backend
//! I/O goes through the [`service::FlowBackend`] trait so the core stays
//! unit-testable without a network.

pub mod builder;
pub mod error;
pub mod models;
pub mod script;
pub mod service;
pub mod verifier;

pub use builder::{build_first_broker_login, FIRST_BROKER_LOGIN_ALIAS};
pub use error::{FlowError, FlowResult};
pub use models::{
    AuthenticationConfig, Execution, FlowConfig, FlowDefinition, Requirement, VerificationResult,
};
pub use service::{FlowBackend, FlowService};
