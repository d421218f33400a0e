use thiserror::Error;

/// Faults a subscription may report through its `error` slot
///
/// Nothing in this crate produces one yet; the slot is part of the observable
/// state so consumers can already match on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("Channel error: {0}")]
    Channel(String),
}

/// Observable state of a room subscription
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionState<T> {
    /// Last accepted payload for the bound room
    pub data: Option<T>,
    pub error: Option<SubscriptionError>,
}

impl<T> SubscriptionState<T> {
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

impl<T> Default for SubscriptionState<T> {
    fn default() -> Self {
        Self::empty()
    }
}
