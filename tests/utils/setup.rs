use serde_json::Value;
use std::sync::Arc;

use roomwatch::{subscribe, RoomSubscription};

use super::mocks::MockChannel;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub channel: Arc<MockChannel>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self {
            channel: Arc::new(MockChannel::new()),
        }
    }

    /// Activate a subscription for `room` on the shared mock channel
    pub fn subscribe(&self, room: Option<&str>) -> RoomSubscription<Value> {
        subscribe::<Value>(self.channel.clone(), room)
    }

    pub fn deliver(&self, table_name: &str, content: Value) {
        self.channel.deliver(Some(table_name), content);
    }
}
