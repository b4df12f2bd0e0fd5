use async_trait::async_trait;

use super::types::{ConnectionId, Departure, RoomId};

/// Tracks live connections and the one room each currently belongs to
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Records a new transport session with no room membership
    async fn register(&self, connection: ConnectionId);

    /// Drops a transport session, removing it from its room first.
    ///
    /// Unknown connections are a no-op. Returns the room that was left, if any.
    async fn unregister(&self, connection: ConnectionId) -> Option<Departure>;

    async fn current_room(&self, connection: ConnectionId) -> Option<RoomId>;

    async fn count_connections(&self) -> usize;
}
