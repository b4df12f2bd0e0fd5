#![allow(dead_code)]

use serde_json::{json, Value};

use roomrelay::MessageHandler;

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Push a raw frame through the router as if it arrived on `peer`'s socket
    pub async fn send_raw(&self, peer: &str, frame: &str) {
        self.router
            .handle_message(self.id(peer), frame.to_string())
            .await;
    }

    pub async fn send_frame(&self, peer: &str, event: &str, data: Value) {
        let frame = json!({ "event": event, "data": data });
        self.send_raw(peer, &frame.to_string()).await;
    }

    pub async fn join(&self, peer: &str, room: &str) {
        self.send_frame(peer, "join", json!(room)).await;
    }

    /// Relay a signaling payload (`offer`, `answer`, `candidate`, `chat-message`)
    pub async fn relay(&self, peer: &str, event: &str, room: &str, payload: Value) {
        let field = payload_field(event);
        self.send_frame(peer, event, json!({ "roomId": room, field: payload }))
            .await;
    }

    pub async fn disconnect(&self, peer: &str) {
        self.router.disconnect(self.id(peer)).await;
    }

    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }
}

/// Name of the payload field carried by a relayed event
pub fn payload_field(event: &str) -> &'static str {
    match event {
        "offer" => "offer",
        "answer" => "answer",
        "candidate" => "candidate",
        "chat-message" => "message",
        other => panic!("{other} is not a relayed event"),
    }
}
