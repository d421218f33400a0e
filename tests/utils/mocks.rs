#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;
use std::sync::{Arc, Mutex};

use roomwatch::channel::{Channel, ChannelEvent, Envelope, EnvelopeHandler, HandlerId};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Every interaction a subscription had with the channel, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelCall {
    On { event: ChannelEvent, handler: HandlerId },
    Off { event: ChannelEvent, handler: HandlerId },
    Emit { event: ChannelEvent, payload: Value },
}

/// Channel that records calls and lets tests push envelopes by hand
#[derive(Clone)]
pub struct MockChannel {
    calls: Arc<Mutex<Vec<ChannelCall>>>,
    handlers: Arc<Mutex<Vec<(ChannelEvent, HandlerId, EnvelopeHandler<Value>)>>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Push an envelope to every live `data_update` handler
    pub fn deliver(&self, table_name: Option<&str>, content: Value) {
        let envelope = Envelope {
            table_name: table_name.map(str::to_string),
            content,
        };
        let handlers: Vec<EnvelopeHandler<Value>> = self
            .handlers
            .lock()
            .unwrap()
            .iter()
            .filter(|(event, _, _)| *event == ChannelEvent::DataUpdate)
            .map(|(_, _, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(&envelope);
        }
    }

    /// Callback registered under `id`, while it is still live
    pub fn handler(&self, id: HandlerId) -> Option<EnvelopeHandler<Value>> {
        self.handlers
            .lock()
            .unwrap()
            .iter()
            .find(|(_, handler_id, _)| *handler_id == id)
            .map(|(_, _, handler)| handler.clone())
    }

    pub fn live_handler_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ChannelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn on_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ChannelCall::On { .. }))
            .count()
    }

    pub fn off_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ChannelCall::Off { .. }))
            .count()
    }

    /// Rooms named by `leave_room` emissions, in emission order
    pub fn left_rooms(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChannelCall::Emit {
                    event: ChannelEvent::LeaveRoom,
                    payload,
                } => payload["room"].as_str().map(str::to_string),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Channel<Value> for MockChannel {
    fn on(&self, event: ChannelEvent, handler: EnvelopeHandler<Value>) -> HandlerId {
        let id = HandlerId::new();
        self.handlers.lock().unwrap().push((event, id, handler));
        self.calls
            .lock()
            .unwrap()
            .push(ChannelCall::On { event, handler: id });
        id
    }

    fn off(&self, event: ChannelEvent, handler: HandlerId) {
        self.handlers
            .lock()
            .unwrap()
            .retain(|(e, id, _)| !(*e == event && *id == handler));
        self.calls
            .lock()
            .unwrap()
            .push(ChannelCall::Off { event, handler });
    }

    fn emit(&self, event: ChannelEvent, payload: Value) {
        self.calls
            .lock()
            .unwrap()
            .push(ChannelCall::Emit { event, payload });
    }
}
