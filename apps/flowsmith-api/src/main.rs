//! flowsmith API
//!
//! HTTP façade that configures and verifies Keycloak first-broker-login
//! authentication flows.

mod config;
mod health;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Config;
use flowsmith_api_flows::{create_flows_router, FlowsState};
use flowsmith_flows::FlowService;
use flowsmith_keycloak::{KeycloakAuth, KeycloakClient, KeycloakCredentials};
use health::healthz_handler;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        keycloak = %config.keycloak_base_url,
        "Starting flowsmith API"
    );

    let auth = KeycloakAuth::new(
        KeycloakCredentials::ClientCredentials {
            client_id: config.keycloak_admin_client_id.clone(),
            client_secret: config.keycloak_admin_client_secret.clone(),
            token_url: config.keycloak_token_url(),
        },
        reqwest::Client::new(),
    );

    let keycloak = match KeycloakClient::new(
        config.keycloak_base_url.clone(),
        auth,
        Duration::from_secs(config.keycloak_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let flows_state = FlowsState::new(FlowService::new(Arc::new(keycloak)));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/healthz", get(healthz_handler))
        .nest("/api/v1", create_flows_router(flows_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Error: server failed: {e}");
        std::process::exit(1);
    }
}

/// Resolve on ctrl-c or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
