// Inbound envelope sources
//
// Adapters that decode `{ table_name, content }` messages and push them into an
// in-memory channel, in the order they arrive.

// Public API
pub use pump::pump;
pub use sources::{decode_envelope, EnvelopeSource, LineSource, StreamSource};

// Internal modules
mod pump;
mod sources;
