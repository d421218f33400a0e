// Channel collaborator
//
// The shared, process-wide connection that room subscriptions listen on.
// Subscriptions only ever touch its listener registry and emit notifications.

// Public API
pub use envelope::{ChannelEvent, Envelope, LeaveRoomPayload};
pub use error::ChannelError;
pub use in_memory::{InMemoryChannel, OutboundMessage};
pub use listener::{Channel, EnvelopeHandler, HandlerId};

// Internal modules
mod envelope;
mod error;
mod in_memory;
mod listener;
