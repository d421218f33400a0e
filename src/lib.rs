// Library crate for roomwatch
// This file exposes the public API for the binary and integration tests

pub mod channel;
pub mod config;
pub mod source;
pub mod subscription;

// Re-export commonly used types for easier access in tests
pub use channel::{
    Channel, ChannelError, ChannelEvent, Envelope, InMemoryChannel, LeaveRoomPayload,
    OutboundMessage,
};
pub use config::WatchConfig;
pub use subscription::{subscribe, RoomSubscription, SubscriptionError, SubscriptionState};
