use std::io;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target address did not resolve to any usable address. Fatal at
    /// startup, the relay never starts serving.
    #[error("resolve {0} failed, {1}")]
    Resolve(String, io::Error),

    /// Binding the listening socket failed. Fatal at startup.
    #[error("bind failed, {0}")]
    Bind(io::Error),

    #[error("dial target failed, {0}")]
    Dial(io::Error),

    #[error("write to target failed, {0}")]
    Write(io::Error),

    #[error("read failed, {0}")]
    Read(io::Error),

    #[error("no reply from target within {0:?}")]
    Timeout(Duration),
}
