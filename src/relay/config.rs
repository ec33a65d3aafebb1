use std::time::Duration;

use serde::Deserialize;

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_buffer() -> usize {
    1024
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source address the relay listens on, e.g. "0.0.0.0:161"
    pub listen: String,

    /// Target address every datagram is forwarded to, e.g.
    /// "192.168.9.80:161". Resolved once at startup.
    pub target: String,

    /// Deadline for one outbound exchange, in seconds, covering both the
    /// send and the reply.
    #[serde(default = "default_timeout", with = "crate::serde::duration")]
    pub timeout: Duration,

    /// Datagram buffer size in bytes. Datagrams larger than this, in either
    /// direction, are truncated.
    #[serde(default = "default_buffer")]
    pub buffer: usize,
}
