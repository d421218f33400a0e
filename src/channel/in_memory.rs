use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::envelope::{ChannelEvent, Envelope};
use super::listener::{Channel, EnvelopeHandler, HandlerId};

/// A notification emitted towards the server side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub event: ChannelEvent,
    pub payload: serde_json::Value,
    pub sent_at: DateTime<Utc>,
}

type Listeners<T> = HashMap<ChannelEvent, Vec<(HandlerId, EnvelopeHandler<T>)>>;

/// Process-local channel
///
/// Keeps the listener registry in memory and queues every emission on an
/// unbounded outbound queue, returned by `new`. Inbound envelopes are pushed
/// in through `deliver`.
pub struct InMemoryChannel<T> {
    // event -> handlers, in registration order
    listeners: RwLock<Listeners<T>>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
}

impl<T> InMemoryChannel<T> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (outbound, outbound_receiver) = mpsc::unbounded_channel();
        let channel = Self {
            listeners: RwLock::new(HashMap::new()),
            outbound,
        };
        (channel, outbound_receiver)
    }

    /// Dispatch an envelope to every `data_update` handler
    ///
    /// Handlers run on a snapshot taken before the first call, outside the
    /// registry lock, so they may register or remove handlers themselves.
    /// Returns the number of handlers invoked.
    pub fn deliver(&self, envelope: &Envelope<T>) -> usize {
        let handlers: Vec<EnvelopeHandler<T>> = {
            let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
            listeners
                .get(&ChannelEvent::DataUpdate)
                .map(|entries| entries.iter().map(|(_, h)| h.clone()).collect())
                .unwrap_or_default()
        };

        debug!(
            table_name = ?envelope.table_name,
            handlers = handlers.len(),
            "Delivering envelope"
        );

        for handler in &handlers {
            handler(envelope);
        }

        handlers.len()
    }

    /// Number of live handlers for `event`
    pub fn listener_count(&self, event: ChannelEvent) -> usize {
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        listeners.get(&event).map_or(0, Vec::len)
    }
}

impl<T> Channel<T> for InMemoryChannel<T>
where
    T: Send + Sync,
{
    fn on(&self, event: ChannelEvent, handler: EnvelopeHandler<T>) -> HandlerId {
        let id = HandlerId::new();
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        listeners.entry(event).or_default().push((id, handler));

        debug!(event = %event, handler = %id, "Handler registered");
        id
    }

    fn off(&self, event: ChannelEvent, handler: HandlerId) {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);

        let removed = match listeners.get_mut(&event) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|(id, _)| *id != handler);
                before - entries.len()
            }
            None => 0,
        };

        if listeners.get(&event).is_some_and(Vec::is_empty) {
            listeners.remove(&event);
        }

        debug!(event = %event, handler = %handler, removed, "Handler removed");
    }

    fn emit(&self, event: ChannelEvent, payload: serde_json::Value) {
        let message = OutboundMessage {
            event,
            payload,
            sent_at: Utc::now(),
        };

        match self.outbound.send(message) {
            Ok(()) => debug!(event = %event, "Notification emitted"),
            Err(_) => warn!(event = %event, "Notification dropped - outbound queue closed"),
        }
    }
}
