use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use byte_string::ByteStr;
use bytes::Bytes;
use futures_util::future::BoxFuture;
use tokio::net::{self, UdpSocket};
use tokio::time;

use super::error::Error;
use super::handler::Handler;

/// UDP client performing a single request/response exchange against the
/// relay target.
///
/// One instance serves the whole process, but every call to [`forward`]
/// opens its own outbound socket and drops it when the exchange finishes,
/// whatever the outcome. Nothing is shared between exchanges.
///
/// [`forward`]: Forwarder::forward
pub struct Forwarder {
    target: SocketAddr,
    timeout: Duration,
    buffer: usize,
}

impl Forwarder {
    /// Resolve `target` once. The first resolved address is used for the
    /// lifetime of the process.
    pub async fn new(target: &str, timeout: Duration, buffer: usize) -> Result<Self, Error> {
        let addr = net::lookup_host(target)
            .await
            .map_err(|err| Error::Resolve(target.to_string(), err))?
            .next()
            .ok_or_else(|| {
                Error::Resolve(target.to_string(), io::ErrorKind::NotFound.into())
            })?;

        Ok(Self {
            target: addr,
            timeout,
            buffer,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Dial the target, send `payload` in one datagram and wait for a single
    /// reply. A reply longer than the configured buffer is truncated.
    ///
    /// One deadline covers the send and the reply together; expiry is the
    /// only cancellation mechanism.
    pub async fn forward(&self, payload: &[u8]) -> Result<Bytes, Error> {
        debug!(message = "forwarding packet", target = %self.target);

        let local: SocketAddr = match self.target {
            SocketAddr::V4(..) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(..) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local).await.map_err(Error::Dial)?;
        socket.connect(self.target).await.map_err(Error::Dial)?;

        let exchange = async {
            let sent = socket.send(payload).await.map_err(Error::Write)?;
            if sent != payload.len() {
                return Err(Error::Write(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("short send, {} of {} bytes", sent, payload.len()),
                )));
            }

            let mut buf = vec![0u8; self.buffer];
            let n = socket.recv(&mut buf).await.map_err(Error::Read)?;
            buf.truncate(n);

            Ok(Bytes::from(buf))
        };

        match time::timeout(self.timeout, exchange).await {
            Ok(Ok(reply)) => {
                debug!(
                    message = "reply from target",
                    target = %self.target,
                    payload = ?ByteStr::new(&reply),
                );

                Ok(reply)
            }
            Ok(Err(err)) => Err(err),
            Err(_elapsed) => Err(Error::Timeout(self.timeout)),
        }
    }
}

impl Handler for Forwarder {
    fn handle(&self, payload: Bytes) -> BoxFuture<'_, Result<Bytes, Error>> {
        Box::pin(async move { self.forward(&payload).await })
    }
}
