use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::channel::{ChannelError, Envelope};

/// Anything that yields inbound envelopes
#[async_trait]
pub trait EnvelopeSource<T>: Send {
    /// Next envelope (None once the source is exhausted)
    ///
    /// A `ChannelError::Decode` only concerns the current message; the
    /// source can keep being polled afterwards.
    async fn next_envelope(&mut self) -> Result<Option<Envelope<T>>, ChannelError>;
}

/// Decode one JSON-encoded envelope
pub fn decode_envelope<T: DeserializeOwned>(raw: &str) -> Result<Envelope<T>, ChannelError> {
    Ok(serde_json::from_str(raw)?)
}

/// Newline-delimited JSON envelopes read from any async reader
pub struct LineSource<R> {
    lines: Lines<R>,
}

impl<R> LineSource<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R, T> EnvelopeSource<T> for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send,
    T: DeserializeOwned + Send,
{
    async fn next_envelope(&mut self) -> Result<Option<Envelope<T>>, ChannelError> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return decode_envelope(line).map(Some);
        }
        Ok(None)
    }
}

/// Raw JSON envelopes taken from a stream
pub struct StreamSource<S> {
    inner: S,
}

impl<S> StreamSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S, T> EnvelopeSource<T> for StreamSource<S>
where
    S: Stream<Item = String> + Unpin + Send,
    T: DeserializeOwned + Send,
{
    async fn next_envelope(&mut self) -> Result<Option<Envelope<T>>, ChannelError> {
        match self.inner.next().await {
            Some(raw) => decode_envelope(&raw).map(Some),
            None => Ok(None),
        }
    }
}
