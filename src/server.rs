//! HTTP surface: routes, middleware and the listener loop.

use axum::{http::Uri, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::shared::{AppError, AppState};
use crate::websockets::websocket_handler;

/// Any origin may connect; there is no credentialed access to protect.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn index() -> &'static str {
    "Room relay signaling server\n\nConnect a WebSocket to /ws\n"
}

async fn health() -> &'static str {
    "OK"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Build the application router around the given state
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ws", get(websocket_handler))
        .fallback(not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(
        address = %address,
        routing_policy = %config.relay.routing_policy,
        announce_departures = config.relay.announce_departures,
        "Signaling server listening"
    );

    let app = build_app(AppState::in_memory(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
