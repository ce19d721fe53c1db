//! Integration tests for the flows API routes using an in-memory backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use flowsmith_api_flows::{create_flows_router, FlowsState};
use flowsmith_flows::{
    Execution, FlowBackend, FlowDefinition, FlowError, FlowResult, FlowService, Requirement,
};

/// In-memory backend: records submissions, serves a canned execution list.
#[derive(Default)]
struct FakeBackend {
    submitted: Mutex<Vec<(String, FlowDefinition)>>,
    executions: Mutex<Option<Vec<Execution>>>,
    fail: bool,
}

#[async_trait]
impl FlowBackend for FakeBackend {
    async fn submit_flow(&self, realm: &str, flow: &FlowDefinition) -> FlowResult<()> {
        if self.fail {
            return Err(FlowError::Backend("connection refused".to_string()));
        }
        self.submitted
            .lock()
            .unwrap()
            .push((realm.to_string(), flow.clone()));
        Ok(())
    }

    async fn fetch_executions(
        &self,
        _realm: &str,
        _flow_alias: &str,
    ) -> FlowResult<Option<Vec<Execution>>> {
        if self.fail {
            return Err(FlowError::Backend("connection refused".to_string()));
        }
        Ok(self.executions.lock().unwrap().clone())
    }
}

fn router_with(backend: Arc<FakeBackend>) -> axum::Router {
    let state = FlowsState::new(FlowService::new(backend));
    create_flows_router(state)
}

fn execution(provider_id: &str) -> Execution {
    Execution {
        requirement: Requirement::Disabled,
        provider_id: provider_id.to_string(),
        priority: 0,
        authentication_config: None,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_flows(realm: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/realms/{realm}/flows"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_flow_without_domains_returns_two_executions() {
    let backend = Arc::new(FakeBackend::default());
    let app = router_with(backend.clone());

    let response = app
        .oneshot(post_flows("test-realm", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let providers: Vec<&str> = body["executions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["providerId"].as_str().unwrap())
        .collect();
    assert_eq!(
        providers,
        vec!["idp-auto-link", "identity-provider-review-profile"]
    );
    assert_eq!(backend.submitted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn create_flow_with_domains_returns_three_executions() {
    let backend = Arc::new(FakeBackend::default());
    let app = router_with(backend);

    let response = app
        .oneshot(post_flows(
            "test-realm",
            json!({"approvedDomains": ["example.com"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let providers: Vec<&str> = body["executions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["providerId"].as_str().unwrap())
        .collect();
    assert_eq!(
        providers,
        vec![
            "idp-auto-link",
            "auth-script-execution",
            "identity-provider-review-profile"
        ]
    );
}

#[tokio::test]
async fn create_flow_accepts_missing_body() {
    let backend = Arc::new(FakeBackend::default());
    let app = router_with(backend);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/realms/test-realm/flows")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["executions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_flow_maps_backend_failure_to_5xx() {
    let backend = Arc::new(FakeBackend {
        fail: true,
        ..Default::default()
    });
    let app = router_with(backend);

    let response = app
        .oneshot(post_flows("test-realm", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "backend_unavailable");
}

#[tokio::test]
async fn verify_valid_flow_returns_success() {
    let backend = Arc::new(FakeBackend::default());
    *backend.executions.lock().unwrap() = Some(vec![
        execution("idp-auto-link"),
        execution("identity-provider-review-profile"),
    ]);
    let app = router_with(backend);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/realms/test-realm/flows/first-broker-login/verify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Flow is valid.");
}

#[tokio::test]
async fn verify_incomplete_flow_returns_400_with_missing_executions() {
    let backend = Arc::new(FakeBackend::default());
    *backend.executions.lock().unwrap() = Some(vec![execution("idp-auto-link")]);
    let app = router_with(backend);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/realms/test-realm/flows/first-broker-login/verify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("missing required executions: identity-provider-review-profile"));
}

#[tokio::test]
async fn verify_missing_flow_returns_400_not_found_message() {
    let backend = Arc::new(FakeBackend::default());
    let app = router_with(backend);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/realms/test-realm/flows/non-existent-flow/verify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("not found"));
}
