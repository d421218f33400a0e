// Room subscriptions
//
// Binds a consumer's lifecycle to one room on a shared channel and exposes the
// latest payload pushed for that room.

// Public API
pub use room_subscription::{subscribe, RoomSubscription};
pub use state::{SubscriptionError, SubscriptionState};

// Internal modules
mod room_subscription;
mod state;
