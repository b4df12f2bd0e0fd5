use async_trait::async_trait;
use std::collections::HashSet;

use super::types::{ConnectionId, Departure, JoinOutcome, RoomId};

/// Maps room ids to the connections joined to them
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Adds the connection to `room`, creating the room on first join.
    ///
    /// A connection is in at most one room: joining a different room leaves
    /// the previous one first.
    async fn join(&self, connection: ConnectionId, room: RoomId) -> JoinOutcome;

    /// Removes the connection from its current room. Empty rooms are discarded.
    async fn leave(&self, connection: ConnectionId) -> Option<Departure>;

    /// Every member of `room` except `excluded`. Unknown rooms yield an empty set.
    async fn members_except(&self, room: &RoomId, excluded: ConnectionId)
        -> HashSet<ConnectionId>;

    async fn count_rooms(&self) -> usize;
}
