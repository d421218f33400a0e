use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::state::{SubscriptionError, SubscriptionState};
use crate::channel::{Channel, ChannelEvent, Envelope, EnvelopeHandler, HandlerId};

/// Handler registration held for the current room
struct Binding {
    room: Option<String>,
    handler: HandlerId,
    // Cleared before `off` so an in-flight callback cannot land after teardown
    live: Arc<AtomicBool>,
}

/// Keeps the latest payload pushed for one room
///
/// While active, exactly one `data_update` handler is registered on the
/// channel. It accepts an envelope only when its `table_name` equals the
/// bound room, replacing `data` wholesale. Tearing a binding down removes that
/// handler and, for a named room, emits `leave_room` with `{ "room": .. }`.
///
/// Dropping the subscription tears it down, so the channel never keeps a
/// handler for a subscription that no longer exists.
pub struct RoomSubscription<T> {
    channel: Arc<dyn Channel<T>>,
    binding: Option<Binding>,
    state: Arc<watch::Sender<SubscriptionState<T>>>,
}

/// Create a subscription and activate it for `room`
pub fn subscribe<T>(channel: Arc<dyn Channel<T>>, room: Option<&str>) -> RoomSubscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    let mut subscription = RoomSubscription::new(channel);
    subscription.activate(room);
    subscription
}

impl<T> RoomSubscription<T> {
    /// Create an inactive subscription with empty state
    pub fn new(channel: Arc<dyn Channel<T>>) -> Self {
        let (state, _) = watch::channel(SubscriptionState::empty());
        Self {
            channel,
            binding: None,
            state: Arc::new(state),
        }
    }

    /// Release the current binding, if any
    ///
    /// Handler removal completes before this returns. Calling it on an
    /// inactive subscription does nothing.
    pub fn deactivate(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };

        binding.live.store(false, Ordering::Release);
        self.channel.off(ChannelEvent::DataUpdate, binding.handler);

        if let Some(room) = &binding.room {
            self.channel
                .emit(ChannelEvent::LeaveRoom, json!({ "room": room }));
        }

        debug!(
            room = ?binding.room,
            handler = %binding.handler,
            "Room subscription ended"
        );
    }

    /// Room of the current binding (`None` when inactive or bound to no room)
    pub fn room(&self) -> Option<&str> {
        self.binding.as_ref().and_then(|b| b.room.as_deref())
    }

    pub fn is_active(&self) -> bool {
        self.binding.is_some()
    }

    /// Receiver notified every time an envelope is accepted
    pub fn watch(&self) -> watch::Receiver<SubscriptionState<T>> {
        self.state.subscribe()
    }

    pub fn error(&self) -> Option<SubscriptionError> {
        self.state.borrow().error.clone()
    }
}

impl<T> RoomSubscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind to `room`, replacing any binding to a different room
    ///
    /// Re-activating with the room already bound keeps the existing handler.
    /// Otherwise the old binding is fully torn down before the new handler is
    /// registered. State is kept across switches: `data` holds the last
    /// accepted payload until the new room pushes one.
    pub fn activate(&mut self, room: Option<&str>) {
        if let Some(binding) = &self.binding {
            if binding.room.as_deref() == room {
                debug!(room = ?room, "Room unchanged - keeping subscription");
                return;
            }
        }

        self.deactivate();

        let room = room.map(str::to_owned);
        let live = Arc::new(AtomicBool::new(true));
        let handler = envelope_handler(room.clone(), Arc::clone(&self.state), Arc::clone(&live));
        let handler_id = self.channel.on(ChannelEvent::DataUpdate, handler);

        debug!(
            room = ?room,
            handler = %handler_id,
            "Room subscription started"
        );

        self.binding = Some(Binding {
            room,
            handler: handler_id,
            live,
        });
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    pub fn state(&self) -> SubscriptionState<T> {
        self.state.borrow().clone()
    }
}

impl<T> Drop for RoomSubscription<T> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

fn envelope_handler<T>(
    room: Option<String>,
    state: Arc<watch::Sender<SubscriptionState<T>>>,
    live: Arc<AtomicBool>,
) -> EnvelopeHandler<T>
where
    T: Clone + Send + Sync + 'static,
{
    Arc::new(move |envelope: &Envelope<T>| {
        if !live.load(Ordering::Acquire) || !envelope.is_for(room.as_deref()) {
            return;
        }
        state.send_modify(|current| current.data = Some(envelope.content.clone()));
    })
}
