// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::websocket_handler;
pub use messages::{EventKind, InboundEvent, OutboundEvent};
pub use router::SignalingRouter;
pub use socket::{Connection, MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod connection_manager;
mod handler;
mod messages;
mod router;
mod socket;
