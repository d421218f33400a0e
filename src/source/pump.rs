use tracing::{debug, warn};

use super::sources::EnvelopeSource;
use crate::channel::{ChannelError, InMemoryChannel};

/// Deliver every envelope from `source` into `channel` until it is exhausted
///
/// Undecodable messages are skipped. Any other source error stops the pump.
/// Returns the number of envelopes delivered.
pub async fn pump<T, S>(source: &mut S, channel: &InMemoryChannel<T>) -> Result<usize, ChannelError>
where
    S: EnvelopeSource<T> + ?Sized,
{
    let mut delivered = 0;

    loop {
        match source.next_envelope().await {
            Ok(Some(envelope)) => {
                channel.deliver(&envelope);
                delivered += 1;
            }
            Ok(None) => break,
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "Skipping undecodable envelope");
            }
            Err(e) => {
                warn!(error = %e, delivered, "Envelope source failed");
                return Err(e);
            }
        }
    }

    debug!(delivered, "Envelope source exhausted");
    Ok(delivered)
}
