use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};

use super::directory::RoomDirectory;
use super::registry::ConnectionRegistry;
use super::types::{ConnectionId, Departure, JoinOutcome, RoomId};

/// Connection registry and room directory behind one handle
pub trait RoomRepository: ConnectionRegistry + RoomDirectory {}

impl<T> RoomRepository for T where T: ConnectionRegistry + RoomDirectory {}

#[derive(Debug, Clone)]
struct ConnectionEntry {
    room: Option<RoomId>,
    connected_at: DateTime<Utc>,
}

impl ConnectionEntry {
    fn new() -> Self {
        Self {
            room: None,
            connected_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct Membership {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl Membership {
    /// Removes `connection` from its room, discarding the room once empty
    fn detach(&mut self, connection: ConnectionId) -> Option<Departure> {
        let room = self.connections.get_mut(&connection)?.room.take()?;

        let remaining = match self.rooms.get_mut(&room) {
            Some(members) => {
                members.remove(&connection);
                members.clone()
            }
            None => HashSet::new(),
        };

        if remaining.is_empty() {
            self.rooms.remove(&room);
            debug!(room_id = %room, "Room emptied and discarded");
        }

        Some(Departure { room, remaining })
    }

    fn others_in(&self, room: &RoomId, excluded: ConnectionId) -> HashSet<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .copied()
                    .filter(|member| *member != excluded)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// In-memory store for connections and rooms.
///
/// Both maps sit behind a single lock so a connection's recorded room and the
/// room's member set never disagree.
pub struct InMemoryRoomRepository {
    membership: Mutex<Membership>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            membership: Mutex::new(Membership::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Membership> {
        self.membership
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn register(&self, connection: ConnectionId) {
        let mut membership = self.lock();
        membership
            .connections
            .entry(connection)
            .or_insert_with(ConnectionEntry::new);
        debug!(connection_id = %connection, "Connection registered");
    }

    #[instrument(skip(self))]
    async fn unregister(&self, connection: ConnectionId) -> Option<Departure> {
        let mut membership = self.lock();
        let departure = membership.detach(connection);

        match membership.connections.remove(&connection) {
            Some(entry) => {
                let connected_for = Utc::now() - entry.connected_at;
                info!(
                    connection_id = %connection,
                    connected_secs = connected_for.num_seconds(),
                    room_id = ?departure.as_ref().map(|d| d.room.as_str()),
                    "Connection unregistered"
                );
            }
            None => debug!(connection_id = %connection, "Unregister of unknown connection ignored"),
        }

        departure
    }

    async fn current_room(&self, connection: ConnectionId) -> Option<RoomId> {
        self.lock()
            .connections
            .get(&connection)
            .and_then(|entry| entry.room.clone())
    }

    async fn count_connections(&self) -> usize {
        self.lock().connections.len()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn join(&self, connection: ConnectionId, room: RoomId) -> JoinOutcome {
        let mut membership = self.lock();

        // Joins from a connection that was never registered still get an entry
        let current = membership
            .connections
            .entry(connection)
            .or_insert_with(ConnectionEntry::new)
            .room
            .clone();

        if current.as_ref() == Some(&room) {
            debug!(connection_id = %connection, room_id = %room, "Already a member of room");
            return JoinOutcome {
                previous: None,
                newly_joined: false,
                others: membership.others_in(&room, connection),
            };
        }

        let previous = membership.detach(connection);

        membership
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection);
        if let Some(entry) = membership.connections.get_mut(&connection) {
            entry.room = Some(room.clone());
        }

        info!(
            connection_id = %connection,
            room_id = %room,
            previous_room = ?previous.as_ref().map(|d| d.room.as_str()),
            "Connection joined room"
        );

        JoinOutcome {
            previous,
            newly_joined: true,
            others: membership.others_in(&room, connection),
        }
    }

    #[instrument(skip(self))]
    async fn leave(&self, connection: ConnectionId) -> Option<Departure> {
        let departure = self.lock().detach(connection);
        if let Some(departure) = &departure {
            info!(connection_id = %connection, room_id = %departure.room, "Connection left room");
        }
        departure
    }

    async fn members_except(
        &self,
        room: &RoomId,
        excluded: ConnectionId,
    ) -> HashSet<ConnectionId> {
        self.lock().others_in(room, excluded)
    }

    async fn count_rooms(&self) -> usize {
        self.lock().rooms.len()
    }
}
