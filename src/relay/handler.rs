use bytes::Bytes;
use futures_util::future::BoxFuture;

use super::error::Error;

/// A datagram handler, dispatched once per received datagram with its own
/// immutable copy of the payload. The returned bytes are written back to the
/// original sender; an empty result means nothing is written back.
pub trait Handler: Send + Sync {
    fn handle(&self, payload: Bytes) -> BoxFuture<'_, Result<Bytes, Error>>;
}
