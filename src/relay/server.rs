use std::sync::Arc;

use byte_string::ByteStr;
use bytes::Bytes;
use tokio::net::UdpSocket;

use super::config::Config;
use super::error::Error;
use super::forward::Forwarder;
use super::handler::Handler;

/// The relay server: a single receive loop on the source socket, one
/// spawned task per received datagram. The loop never waits on in-flight
/// exchanges; replies are written back through the listening socket from
/// the tasks themselves.
pub struct Server {
    addr: String,
    buffer: usize,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Server {
    /// Build the relay from its config: one forwarder dialing the fixed
    /// target, registered as the only handler.
    pub async fn new(config: Config) -> Result<Self, Error> {
        let forwarder = Forwarder::new(&config.target, config.timeout, config.buffer).await?;

        info!(message = "forwarding to target", target = %forwarder.target());

        Ok(Self::with_handlers(
            config.listen,
            config.buffer,
            vec![Arc::new(forwarder)],
        ))
    }

    /// Build a relay with an explicit handler chain. Every handler is
    /// dispatched independently for every received datagram.
    pub fn with_handlers(addr: String, buffer: usize, handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self {
            addr,
            buffer,
            handlers,
        }
    }

    /// Bind the source socket and serve until reading from it fails.
    ///
    /// Per-exchange failures are contained in their task and logged, they
    /// never reach this loop. The original sender simply gets no reply.
    pub async fn serve(self) -> Result<(), Error> {
        let socket = UdpSocket::bind(&self.addr).await.map_err(Error::Bind)?;
        let socket = Arc::new(socket);

        info!(message = "start udp relay", addr = self.addr);

        let mut buf = vec![0u8; self.buffer];
        loop {
            // A datagram longer than the buffer is silently truncated.
            let (n, src) = socket.recv_from(&mut buf).await.map_err(Error::Read)?;

            // Snapshot before dispatch, the buffer is overwritten by the
            // next receive while tasks are still running.
            let payload = Bytes::copy_from_slice(&buf[..n]);

            debug!(
                message = "received datagram",
                ?src,
                payload = ?ByteStr::new(&payload),
            );

            for handler in &self.handlers {
                let handler = Arc::clone(handler);
                let socket = Arc::clone(&socket);
                let payload = payload.clone();

                tokio::spawn(async move {
                    let reply = match handler.handle(payload).await {
                        Ok(reply) => reply,
                        Err(err) => {
                            warn!(message = "exchange failed", ?err, ?src);
                            return;
                        }
                    };

                    if reply.is_empty() {
                        return;
                    }

                    if let Err(err) = socket.send_to(&reply, src).await {
                        warn!(message = "send reply failed", ?err, ?src);
                    }
                });
            }
        }
    }
}
