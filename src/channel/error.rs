use thiserror::Error;

/// Errors raised by the channel plumbing (never by a subscription)
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ChannelError {
    /// Whether the failure only affects a single message
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChannelError::Decode(_))
    }
}

impl From<serde_json::Error> for ChannelError {
    fn from(e: serde_json::Error) -> Self {
        ChannelError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for ChannelError {
    fn from(e: std::io::Error) -> Self {
        ChannelError::Io(e.to_string())
    }
}
