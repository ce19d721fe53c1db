//! First-broker-login flow builder.
//!
//! Pure and deterministic: the execution set is fully determined by the
//! input configuration, with no I/O and no external state.

use std::collections::BTreeMap;

use crate::models::{AuthenticationConfig, Execution, FlowConfig, FlowDefinition, Requirement};
use crate::script::{domain_validator_script, DOMAIN_VALIDATOR_ALIAS, SCRIPT_CODE_KEY};

/// Alias under which the flow is created in the realm.
pub const FIRST_BROKER_LOGIN_ALIAS: &str = "first-broker-login";

/// Flow kind for top-level login flows.
const FLOW_PROVIDER_ID: &str = "basic-flow";

const FLOW_DESCRIPTION: &str =
    "First broker login flow with automatic account linking and optional approved-domain validation";

/// Priorities of the backbone steps. The domain-validation script slots
/// strictly between them: it must run after the linking decision and before
/// profile review.
const AUTO_LINK_PRIORITY: i32 = 10;
const DOMAIN_VALIDATION_PRIORITY: i32 = 15;
const REVIEW_PROFILE_PRIORITY: i32 = 20;

/// Build the first-broker-login flow definition for the given configuration.
///
/// A non-empty `approved_domains` list adds the domain-validation script
/// execution; otherwise only the two backbone steps are produced.
#[must_use]
pub fn build_first_broker_login(config: &FlowConfig) -> FlowDefinition {
    let mut executions = vec![Execution {
        requirement: Requirement::Alternative,
        provider_id: "idp-auto-link".to_string(),
        priority: AUTO_LINK_PRIORITY,
        authentication_config: None,
    }];

    if !config.approved_domains.is_empty() {
        executions.push(domain_validation_execution(&config.approved_domains));
    }

    executions.push(Execution {
        requirement: Requirement::Required,
        provider_id: "identity-provider-review-profile".to_string(),
        priority: REVIEW_PROFILE_PRIORITY,
        authentication_config: None,
    });

    executions.sort_by_key(|execution| execution.priority);

    FlowDefinition {
        alias: FIRST_BROKER_LOGIN_ALIAS.to_string(),
        provider_id: FLOW_PROVIDER_ID.to_string(),
        top_level: true,
        description: FLOW_DESCRIPTION.to_string(),
        executions,
    }
}

fn domain_validation_execution(approved_domains: &[String]) -> Execution {
    let mut config = BTreeMap::new();
    config.insert(
        SCRIPT_CODE_KEY.to_string(),
        domain_validator_script(approved_domains),
    );

    Execution {
        requirement: Requirement::Required,
        provider_id: "auth-script-execution".to_string(),
        priority: DOMAIN_VALIDATION_PRIORITY,
        authentication_config: Some(AuthenticationConfig {
            alias: DOMAIN_VALIDATOR_ALIAS.to_string(),
            config,
        }),
    }
}
