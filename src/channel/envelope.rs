use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Named events carried by the channel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelEvent {
    // Server -> Client
    DataUpdate,

    // Client -> Server
    LeaveRoom,
}

/// Inbound message pushed on `data_update`
///
/// `content` is opaque: it is passed through to subscribers untouched.
/// A missing `table_name` is tolerated and simply matches no room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub table_name: Option<String>,
    pub content: T,
}

impl<T> Envelope<T> {
    pub fn new(table_name: impl Into<String>, content: T) -> Self {
        Self {
            table_name: Some(table_name.into()),
            content,
        }
    }

    /// Whether this envelope targets `room`.
    ///
    /// Both sides must be present and equal, so an absent room never matches.
    pub fn is_for(&self, room: Option<&str>) -> bool {
        matches!(
            (self.table_name.as_deref(), room),
            (Some(table), Some(room)) if table == room
        )
    }
}

/// Payload of the `leave_room` notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRoomPayload {
    pub room: String,
}
