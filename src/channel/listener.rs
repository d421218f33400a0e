use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::envelope::{ChannelEvent, Envelope};

/// Callback invoked once per inbound envelope
pub type EnvelopeHandler<T> = Arc<dyn Fn(&Envelope<T>) + Send + Sync>;

/// Identity of a registered handler
///
/// Closures cannot be compared, so `on` hands back an id and `off` takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(Uuid);

impl HandlerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HandlerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared bidirectional connection that subscriptions attach to
///
/// Implementations own connection state, reconnection and serialization.
/// Callers only register/deregister listeners and emit notifications:
/// - `on` registers `handler` for `event` and returns its id
/// - `off` removes exactly the handler with that id (unknown ids are ignored)
/// - `emit` is fire-and-forget; failures are the channel's own concern
pub trait Channel<T>: Send + Sync {
    fn on(&self, event: ChannelEvent, handler: EnvelopeHandler<T>) -> HandlerId;

    fn off(&self, event: ChannelEvent, handler: HandlerId);

    fn emit(&self, event: ChannelEvent, payload: serde_json::Value);
}
