use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use roomrelay::{ConnectionId, ConnectionManager};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every outbound frame instead of writing to a socket
#[derive(Clone, Default)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<ConnectionId, VecDeque<String>>>>,
    connected: Arc<RwLock<Vec<ConnectionId>>>,
}

#[allow(dead_code)]
impl MockConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_messages_for(&self, connection: ConnectionId) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(&connection)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pops the oldest frame sent to `connection`
    pub async fn consume_message_for(&self, connection: ConnectionId) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(&connection)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }

    pub async fn is_connected(&self, connection: ConnectionId) -> bool {
        self.connected.read().await.contains(&connection)
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection: ConnectionId, _sender: mpsc::UnboundedSender<String>) {
        self.connected.write().await.push(connection);
    }

    async fn remove_connection(&self, connection: ConnectionId) {
        self.connected.write().await.retain(|c| *c != connection);
    }

    async fn send_to_connections(&self, connections: &[ConnectionId], message: &str) -> usize {
        let mut queued = 0;
        for connection in connections {
            if self.is_connected(*connection).await {
                self.sent_messages
                    .write()
                    .await
                    .entry(*connection)
                    .or_default()
                    .push_back(message.to_string());
                queued += 1;
            }
        }
        queued
    }

    async fn count_connections(&self) -> usize {
        self.connected.read().await.len()
    }
}
