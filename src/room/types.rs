use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Opaque, server-assigned identity of one live transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generates a fresh identity for a new connection
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Caller-supplied room token. Any string is accepted, including the empty one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connection leaving a room, with whoever is still in it afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomId,
    /// Members left behind. Empty when the room was discarded.
    pub remaining: HashSet<ConnectionId>,
}

impl Departure {
    /// Whether the departing connection was the last member
    pub fn room_closed(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Result of a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Set when joining moved the connection out of a different room
    pub previous: Option<Departure>,
    /// False when the connection was already a member of the target room
    pub newly_joined: bool,
    /// Other members of the target room, taken in the same critical section as the join
    pub others: HashSet<ConnectionId>,
}
