//! Domain-validator script generation.
//!
//! The generated script is an opaque artifact from the core's perspective:
//! it is embedded into the flow definition and executed by the identity
//! backend's script authenticator, never interpreted locally. Tests pin the
//! exact `var approvedDomains = [...];` line because downstream tooling
//! greps for it.

/// Alias of the authentication config entry carrying the script.
pub const DOMAIN_VALIDATOR_ALIAS: &str = "Domain Validator";

/// Config key under which the script body is stored.
pub const SCRIPT_CODE_KEY: &str = "script.code";

/// Generate the email-domain validation script for the given approved
/// domains.
///
/// The domain list is embedded verbatim as a JSON array literal. The script
/// fails with `INVALID_USER` when the authenticated user has no email,
/// succeeds when the domain after the last `@` is approved, and fails with
/// `INVALID_CREDENTIALS` otherwise.
#[must_use]
pub fn domain_validator_script(approved_domains: &[String]) -> String {
    // Vec<String> -> JSON array cannot fail; fall back to [] regardless.
    let domains_json =
        serde_json::to_string(approved_domains).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"AuthenticationFlowError = Java.type("org.keycloak.authentication.AuthenticationFlowError");

var approvedDomains = {domains_json};

function authenticate(context) {{
    var email = user.getEmail();
    if (!email) {{
        context.failure(AuthenticationFlowError.INVALID_USER);
        return;
    }}
    var domain = email.substring(email.lastIndexOf("@") + 1);
    if (approvedDomains.indexOf(domain) >= 0) {{
        context.success();
    }} else {{
        context.failure(AuthenticationFlowError.INVALID_CREDENTIALS);
    }}
}}
"#
    )
}
