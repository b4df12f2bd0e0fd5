// Public API - what other modules can use
pub use directory::RoomDirectory;
pub use registry::ConnectionRegistry;
pub use repository::{InMemoryRoomRepository, RoomRepository};
pub use types::{ConnectionId, Departure, JoinOutcome, RoomId};

// Internal modules
mod directory;
mod registry;
mod repository;
mod types;
