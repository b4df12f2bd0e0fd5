// Library crate for the room relay signaling server
// This file exposes the public API for integration tests

pub mod config;
pub mod room;
pub mod server;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::{RelayConfig, RoutingPolicy, ServerConfig};
pub use room::{ConnectionId, InMemoryRoomRepository, RoomId, RoomRepository};
pub use server::build_app;
pub use shared::{AppError, AppState, SignalingError};
pub use websockets::{
    ConnectionManager, InboundEvent, MessageHandler, OutboundEvent, SignalingRouter,
};
