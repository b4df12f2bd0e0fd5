use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::room::ConnectionId;

/// Outbound side of every live connection
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection: ConnectionId, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, connection: ConnectionId);

    /// Queues a frame for each connection, returning how many accepted it.
    /// Unknown or closed connections are skipped.
    async fn send_to_connections(&self, connections: &[ConnectionId], message: &str) -> usize;

    async fn count_connections(&self) -> usize;
}

pub struct InMemoryConnectionManager {
    // connection id -> sender
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(connection, sender);
    }

    async fn remove_connection(&self, connection: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&connection);
    }

    async fn send_to_connections(&self, connections: &[ConnectionId], message: &str) -> usize {
        let senders = self.connections.read().await;
        connections
            .iter()
            .filter_map(|connection| senders.get(connection).map(|sender| (connection, sender)))
            .filter(|(connection, sender)| match sender.send(message.to_string()) {
                Ok(()) => true,
                Err(_) => {
                    debug!(connection_id = %connection, "Dropped frame for closed connection");
                    false
                }
            })
            .count()
    }

    async fn count_connections(&self) -> usize {
        self.connections.read().await.len()
    }
}
