use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use roomrelay::{
    ConnectionId, InMemoryRoomRepository, RelayConfig, RoutingPolicy, SignalingRouter,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub router: SignalingRouter,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    /// Peer name -> connection id
    pub peers: HashMap<String, ConnectionId>,
}

pub struct TestSetupBuilder {
    peers: Vec<String>,
    config: RelayConfig,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            peers: vec![],
            config: RelayConfig::default(),
        }
    }

    pub fn with_peers(mut self, peers: Vec<&str>) -> Self {
        self.peers = peers.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_peers(self) -> Self {
        self.with_peers(vec!["alice", "bob"])
    }

    pub fn with_three_peers(self) -> Self {
        self.with_peers(vec!["alice", "bob", "carol"])
    }

    pub fn with_routing_policy(mut self, policy: RoutingPolicy) -> Self {
        self.config.routing_policy = policy;
        self
    }

    pub fn announcing_departures(mut self) -> Self {
        self.config.announce_departures = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let router = SignalingRouter::new(rooms.clone(), mock_conn_manager.clone(), self.config);

        // Connect peers; the mock never reads from the channel
        let mut peers = HashMap::new();
        for peer in self.peers {
            let id = ConnectionId::new();
            let (sender, _receiver) = mpsc::unbounded_channel();
            router.connect(id, sender).await;
            peers.insert(peer, id);
        }

        TestSetup {
            router,
            rooms,
            mock_conn_manager,
            peers,
        }
    }
}

impl TestSetup {
    pub fn id(&self, peer: &str) -> ConnectionId {
        *self
            .peers
            .get(peer)
            .unwrap_or_else(|| panic!("unknown peer {peer}"))
    }
}
