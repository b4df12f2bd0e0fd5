//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    peers: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for specific peers
    pub fn for_peers(setup: &'a TestSetup, peers: Vec<&'a str>) -> Self {
        Self { setup, peers }
    }

    pub fn for_peer(setup: &'a TestSetup, peer: &'a str) -> Self {
        Self::for_peers(setup, vec![peer])
    }

    /// Assert that each peer's next frame is exactly `expected` (consumes it)
    pub async fn received(self, expected: Value) {
        for peer in &self.peers {
            let frame = self
                .setup
                .mock_conn_manager
                .consume_message_for(self.setup.id(peer))
                .await
                .unwrap_or_else(|| panic!("{peer} should have received {expected}"));

            let frame: Value = serde_json::from_str(&frame).unwrap();
            assert_eq!(frame, expected, "{peer} received the wrong frame");
        }
    }

    /// Assert that each peer's next frame has the given event name (consumes it)
    pub async fn received_event(self, event: &str) {
        for peer in &self.peers {
            let frame = self
                .setup
                .mock_conn_manager
                .consume_message_for(self.setup.id(peer))
                .await
                .unwrap_or_else(|| panic!("{peer} should have received {event}"));

            let frame: Value = serde_json::from_str(&frame).unwrap();
            assert_eq!(frame["event"], event, "{peer} received the wrong event");
        }
    }

    /// Assert that peers have nothing pending
    pub async fn received_no_messages(self) {
        for peer in &self.peers {
            let messages = self
                .setup
                .mock_conn_manager
                .get_messages_for(self.setup.id(peer))
                .await;
            assert!(
                messages.is_empty(),
                "{peer} should not have received any messages, got {messages:?}"
            );
        }
    }
}
