use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::room::{InMemoryRoomRepository, RoomRepository};
use crate::websockets::{ConnectionManager, InMemoryConnectionManager, SignalingRouter};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub room_repository: Arc<dyn RoomRepository>,
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub router: Arc<SignalingRouter>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        room_repository: Arc<dyn RoomRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        let router = Arc::new(SignalingRouter::new(
            Arc::clone(&room_repository),
            Arc::clone(&connection_manager),
            config.relay.clone(),
        ));

        Self {
            room_repository,
            connection_manager,
            router,
        }
    }

    /// State backed by fresh in-memory stores
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryConnectionManager::new()),
        )
    }
}

/// Failures while routing a signaling frame. Never reported to the sender.
#[derive(Error, Debug)]
pub enum SignalingError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
