use std::fmt::Formatter;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use tracing::Level;

use crate::relay;

const fn default_timestamp() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Log {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub level: Level,

    #[serde(default = "default_timestamp")]
    pub timestamp: bool,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            timestamp: true,
        }
    }
}

#[derive(Deserialize)]
pub struct Config {
    /// Worker threads for tokio runtime, if it is not set,
    /// use num_cpu::get()
    pub worker: Option<usize>,

    /// Configuration for tracing logs
    #[serde(default)]
    pub log: Log,

    pub relay: relay::Config,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read config failed, {0}")]
    Io(#[from] std::io::Error),

    #[error("deserialize config failed, {0}")]
    Deserialize(#[from] serde_yaml::Error),
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        let content = match std::env::var("UDPRELAY_CONFIG") {
            Ok(path) => std::fs::read(path),
            _ => std::fs::read("config.yaml"),
        }?;

        let cfg = serde_yaml::from_slice::<Config>(content.as_slice())?;

        Ok(cfg)
    }

    pub fn worker(&self) -> usize {
        if let Some(worker) = self.worker {
            worker
        } else {
            num_cpus::get()
        }
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor {}

    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Level;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("trace, debug, info, warn and error")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Level::from_str(v)
                .map_err(|err| serde::de::Error::custom(format!("invalid level {}", err)))
        }
    }

    deserializer.deserialize_any(Visitor {})
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn minimal() {
        let content = r#"
relay:
  listen: 127.0.0.1:9000
  target: 127.0.0.1:9001
"#;

        let config = serde_yaml::from_str::<Config>(content).unwrap();

        assert_eq!(config.relay.listen, "127.0.0.1:9000");
        assert_eq!(config.relay.target, "127.0.0.1:9001");
        assert_eq!(config.relay.timeout, Duration::from_secs(60));
        assert_eq!(config.relay.buffer, 1024);
        assert_eq!(config.log.level, Level::INFO);
        assert!(config.log.timestamp);
    }

    #[test]
    fn full() {
        let content = r#"
worker: 2
log:
  level: debug
  timestamp: false
relay:
  listen: 0.0.0.0:161
  target: 192.168.9.80:161
  timeout: 5
  buffer: 2048
"#;

        let config = serde_yaml::from_str::<Config>(content).unwrap();

        assert_eq!(config.worker(), 2);
        assert_eq!(config.log.level, Level::DEBUG);
        assert!(!config.log.timestamp);
        assert_eq!(config.relay.timeout, Duration::from_secs(5));
        assert_eq!(config.relay.buffer, 2048);
    }

    #[test]
    fn unknown_relay_field_is_rejected() {
        let content = r#"
relay:
  listen: 127.0.0.1:9000
  target: 127.0.0.1:9001
  retries: 3
"#;

        assert!(serde_yaml::from_str::<Config>(content).is_err());
    }
}
