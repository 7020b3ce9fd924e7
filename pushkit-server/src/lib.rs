//! HTTP backend of the Pushkit notification system.
//!
//! Every endpoint lives under `/api/notification`.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | POST | `/register` | write the welcome notification, return the listen URL |
//! | POST | `/send-random` | write a random notification |
//! | POST | `/send` | write a caller-defined notification |
//! | POST | `/firebase-path` | report the hashed path for a user |
//! | GET | `/user/{userId}` | stored notifications, newest first |
//! | GET | `/test` | liveness probe |
//! | GET | `/firebase-config` | project id and database URL for clients |
//!
//! # Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `PUSHKIT_PORT` | `5100` |
//! | `PUSHKIT_DATABASE_URL` | derived from the service account |
//! | `PUSHKIT_SERVICE_ACCOUNT` | `firebase-service-account.json` |
//! | `PUSHKIT_REGION` | `asia-southeast1` |
//! | `PUSHKIT_AUTH_TOKEN` | none |
//! | `PUSHKIT_MOCK_STORE` | `false` |
//!
//! `FIREBASE_DATABASE_URL` is read as a last resort. Logging follows `RUST_LOG`.
//!
//! ```sh
//! PUSHKIT_MOCK_STORE=1 RUST_LOG=info cargo run -p pushkit-server
//! ```

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use config::ServerConfig;
use routes::{
    firebase_config_handler, firebase_path_handler, register_handler, send_handler,
    send_random_handler, test_handler, user_notifications_handler,
};
use state::AppState;

pub const API_PREFIX: &str = "/api/notification";

const DEFAULT_LOG_FILTER: &str = "pushkit_server=info,pushkit_lib=info";

/// Build the router around `state`.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/register", post(register_handler))
        .route("/send-random", post(send_random_handler))
        .route("/send", post(send_handler))
        .route("/firebase-path", post(firebase_path_handler))
        .route("/user/{user_id}", get(user_notifications_handler))
        .route("/test", get(test_handler))
        .route("/firebase-config", get(firebase_config_handler));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Loading configuration...");
    let config = ServerConfig::load()?;

    info!("Initializing state...");
    let state = AppState::new(config)?;

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Server running on {address}{API_PREFIX}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
