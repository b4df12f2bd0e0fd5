use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{RelayConfig, RoutingPolicy};
use crate::room::{ConnectionId, Departure, RoomId, RoomRepository};
use crate::shared::SignalingError;

use super::connection_manager::ConnectionManager;
use super::messages::{InboundEvent, OutboundEvent};
use super::socket::MessageHandler;

/// Routes inbound frames to the other members of the addressed room
pub struct SignalingRouter {
    rooms: Arc<dyn RoomRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
    config: RelayConfig,
}

impl SignalingRouter {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        connection_manager: Arc<dyn ConnectionManager>,
        config: RelayConfig,
    ) -> Self {
        Self {
            rooms,
            connection_manager,
            config,
        }
    }

    /// Registers a freshly accepted transport session and its outbound channel
    pub async fn connect(&self, connection: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        self.rooms.register(connection).await;
        self.connection_manager
            .add_connection(connection, sender)
            .await;
        info!(connection_id = %connection, "Connection opened");
    }

    /// Tears down a transport session. Safe to call more than once.
    pub async fn disconnect(&self, connection: ConnectionId) {
        self.connection_manager.remove_connection(connection).await;

        if let Some(departure) = self.rooms.unregister(connection).await {
            if let Err(e) = self.announce_departure(connection, &departure).await {
                warn!(connection_id = %connection, error = %e, "Failed to announce departure");
            }
        }
        info!(connection_id = %connection, "Connection closed");
    }

    /// Routes one decoded frame, returning how many connections accepted it
    pub async fn dispatch(
        &self,
        sender: ConnectionId,
        event: InboundEvent,
    ) -> Result<usize, SignalingError> {
        debug!(
            connection_id = %sender,
            event = %event.kind(),
            room_id = %event.room_id(),
            "Dispatching event"
        );

        match event {
            InboundEvent::Join(room_id) => self.join(sender, room_id).await,
            InboundEvent::Offer { room_id, offer } => {
                self.relay(sender, &room_id, OutboundEvent::Offer { offer })
                    .await
            }
            InboundEvent::Answer { room_id, answer } => {
                self.relay(sender, &room_id, OutboundEvent::Answer { answer })
                    .await
            }
            InboundEvent::Candidate { room_id, candidate } => {
                self.relay(sender, &room_id, OutboundEvent::Candidate { candidate })
                    .await
            }
            InboundEvent::ChatMessage { room_id, message } => {
                self.relay(sender, &room_id, OutboundEvent::ChatMessage { message })
                    .await
            }
        }
    }

    async fn join(&self, sender: ConnectionId, room_id: RoomId) -> Result<usize, SignalingError> {
        let outcome = self.rooms.join(sender, room_id).await;

        if let Some(previous) = &outcome.previous {
            self.announce_departure(sender, previous).await?;
        }

        // Members as of the join itself; later joiners are told by their own join
        let recipients: Vec<ConnectionId> = outcome.others.into_iter().collect();
        self.deliver(&recipients, &OutboundEvent::Joined).await
    }

    async fn relay(
        &self,
        sender: ConnectionId,
        room_id: &RoomId,
        event: OutboundEvent,
    ) -> Result<usize, SignalingError> {
        if self.config.routing_policy == RoutingPolicy::Membership {
            let current = self.rooms.current_room(sender).await;
            if current.as_ref() != Some(room_id) {
                warn!(
                    connection_id = %sender,
                    room_id = %room_id,
                    current_room = ?current.as_ref().map(RoomId::as_str),
                    event = %event.kind(),
                    "Dropping frame addressed to a room the sender has not joined"
                );
                return Ok(0);
            }
        }

        let recipients = self.rooms.members_except(room_id, sender).await;
        self.deliver(&recipients.into_iter().collect::<Vec<_>>(), &event)
            .await
    }

    async fn announce_departure(
        &self,
        connection: ConnectionId,
        departure: &Departure,
    ) -> Result<usize, SignalingError> {
        if !self.config.announce_departures || departure.room_closed() {
            return Ok(0);
        }

        debug!(
            connection_id = %connection,
            room_id = %departure.room,
            "Announcing departure"
        );
        let remaining: Vec<ConnectionId> = departure.remaining.iter().copied().collect();
        self.deliver(&remaining, &OutboundEvent::Left).await
    }

    async fn deliver(
        &self,
        recipients: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<usize, SignalingError> {
        if recipients.is_empty() {
            debug!(event = %event.kind(), "No recipients");
            return Ok(0);
        }

        let frame = serde_json::to_string(event)?;
        let queued = self
            .connection_manager
            .send_to_connections(recipients, &frame)
            .await;

        debug!(
            event = %event.kind(),
            recipients = recipients.len(),
            queued = queued,
            "Event delivered"
        );
        Ok(queued)
    }
}

#[async_trait]
impl MessageHandler for SignalingRouter {
    async fn handle_message(&self, connection: ConnectionId, message: String) {
        let event = match message.parse::<InboundEvent>() {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    connection_id = %connection,
                    error = %e,
                    "Failed to parse signaling frame"
                );
                return;
            }
        };

        if let Err(e) = self.dispatch(connection, event).await {
            warn!(connection_id = %connection, error = %e, "Failed to route signaling frame");
        }
    }
}
