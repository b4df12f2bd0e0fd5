use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display};

use crate::room::RoomId;

/// Event names carried in the `event` field of every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Join,
    Joined,
    Left,
    Offer,
    Answer,
    Candidate,
    ChatMessage,
}

/// Client -> Server frames.
///
/// Payloads are forwarded untouched; a missing payload field is relayed as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum InboundEvent {
    Join(RoomId),
    Offer {
        #[serde(rename = "roomId", alias = "room_id")]
        room_id: RoomId,
        #[serde(default)]
        offer: Value,
    },
    Answer {
        #[serde(rename = "roomId", alias = "room_id")]
        room_id: RoomId,
        #[serde(default)]
        answer: Value,
    },
    Candidate {
        #[serde(rename = "roomId", alias = "room_id")]
        room_id: RoomId,
        #[serde(default)]
        candidate: Value,
    },
    ChatMessage {
        #[serde(rename = "roomId", alias = "room_id")]
        room_id: RoomId,
        #[serde(default)]
        message: Value,
    },
}

impl InboundEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InboundEvent::Join(_) => EventKind::Join,
            InboundEvent::Offer { .. } => EventKind::Offer,
            InboundEvent::Answer { .. } => EventKind::Answer,
            InboundEvent::Candidate { .. } => EventKind::Candidate,
            InboundEvent::ChatMessage { .. } => EventKind::ChatMessage,
        }
    }

    /// The room this frame targets
    pub fn room_id(&self) -> &RoomId {
        match self {
            InboundEvent::Join(room_id)
            | InboundEvent::Offer { room_id, .. }
            | InboundEvent::Answer { room_id, .. }
            | InboundEvent::Candidate { room_id, .. }
            | InboundEvent::ChatMessage { room_id, .. } => room_id,
        }
    }
}

impl std::str::FromStr for InboundEvent {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

/// Server -> Client frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum OutboundEvent {
    /// Another connection joined the room
    Joined,
    /// Another connection left the room. Only sent when departures are announced.
    Left,
    Offer { offer: Value },
    Answer { answer: Value },
    Candidate { candidate: Value },
    ChatMessage { message: Value },
}

impl OutboundEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            OutboundEvent::Joined => EventKind::Joined,
            OutboundEvent::Left => EventKind::Left,
            OutboundEvent::Offer { .. } => EventKind::Offer,
            OutboundEvent::Answer { .. } => EventKind::Answer,
            OutboundEvent::Candidate { .. } => EventKind::Candidate,
            OutboundEvent::ChatMessage { .. } => EventKind::ChatMessage,
        }
    }
}
