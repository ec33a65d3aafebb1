mod config;
pub mod relay;
mod serde;
mod signals;
mod trace;

#[macro_use]
extern crate tracing;

pub use config::Config;
pub use signals::shutdown;
pub use trace::init as trace_init;
