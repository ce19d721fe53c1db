//! Integration tests for the Keycloak admin client against a wiremock
//! server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flowsmith_flows::{FlowConfig, FlowError, FlowService};
use flowsmith_keycloak::{KeycloakAuth, KeycloakClient, KeycloakCredentials, KeycloakError};

fn bearer_client(server: &MockServer) -> KeycloakClient {
    let auth = KeycloakAuth::new(
        KeycloakCredentials::Bearer {
            token: "test-token".to_string(),
        },
        reqwest::Client::new(),
    );
    KeycloakClient::with_http_client(server.uri(), auth, reqwest::Client::new())
}

#[tokio::test]
async fn create_flow_posts_definition_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/test-realm/authentication/flows"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "alias": "first-broker-login",
            "providerId": "basic-flow",
            "topLevel": true,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = bearer_client(&server);
    let service = FlowService::new(Arc::new(client));
    let flow = service
        .create_flow("test-realm", &FlowConfig::default())
        .await
        .unwrap();
    assert_eq!(flow.executions.len(), 2);
}

#[tokio::test]
async fn create_flow_surfaces_api_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/test-realm/authentication/flows"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = bearer_client(&server);
    let err = client
        .create_flow(
            "test-realm",
            &flowsmith_flows::build_first_broker_login(&FlowConfig::default()),
        )
        .await
        .unwrap_err();
    match err {
        KeycloakError::Api { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn flow_executions_parses_backend_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/admin/realms/test-realm/authentication/flows/first-broker-login/executions",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"providerId": "idp-auto-link", "requirement": "ALTERNATIVE", "priority": 10},
            {"providerId": "identity-provider-review-profile"},
        ])))
        .mount(&server)
        .await;

    let client = bearer_client(&server);
    let executions = client
        .flow_executions("test-realm", "first-broker-login")
        .await
        .unwrap()
        .expect("flow exists");
    assert_eq!(executions.len(), 2);
    assert_eq!(executions[0].provider_id, "idp-auto-link");
    assert_eq!(executions[1].provider_id, "identity-provider-review-profile");
}

#[tokio::test]
async fn flow_executions_returns_none_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/admin/realms/test-realm/authentication/flows/missing/executions",
        ))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = bearer_client(&server);
    let executions = client
        .flow_executions("test-realm", "missing")
        .await
        .unwrap();
    assert!(executions.is_none());
}

#[tokio::test]
async fn client_credentials_token_is_fetched_and_cached() {
    let server = MockServer::start().await;

    // Token endpoint must be hit exactly once; the second API call reuses
    // the cached token.
    Mock::given(method("POST"))
        .and(path("/realms/master/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "cc-token",
            "expires_in": 300,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/admin/realms/test-realm/authentication/flows/first-broker-login/executions",
        ))
        .and(header("authorization", "Bearer cc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let auth = KeycloakAuth::new(
        KeycloakCredentials::ClientCredentials {
            client_id: "flowsmith".to_string(),
            client_secret: "secret".to_string(),
            token_url: format!("{}/realms/master/protocol/openid-connect/token", server.uri()),
        },
        reqwest::Client::new(),
    );
    let client = KeycloakClient::with_http_client(server.uri(), auth, reqwest::Client::new());

    for _ in 0..2 {
        client
            .flow_executions("test-realm", "first-broker-login")
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn verify_through_service_maps_backend_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/admin/realms/test-realm/authentication/flows/first-broker-login/executions",
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = bearer_client(&server);
    let service = FlowService::new(Arc::new(client));
    let err = service
        .verify_flow("test-realm", "first-broker-login")
        .await
        .unwrap_err();
    match err {
        FlowError::BackendRejected { status, .. } => assert_eq!(status, 500),
        other => panic!("expected BackendRejected, got {other:?}"),
    }
}
