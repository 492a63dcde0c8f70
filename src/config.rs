use crate::{QueueError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_PREFIX: &str = "taskqueue";
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Connection and key settings for a [`crate::QueueClient`].
///
/// Fields missing from a serialized config fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host name or IP address of the store
    pub address: String,

    pub port: u16,

    /// First part of every list key (`<prefix>:<type>`)
    pub prefix: String,

    /// Connect timeout in seconds, 0 disables it
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            prefix: DEFAULT_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reads `LISTQ_ADDRESS`, `LISTQ_PORT`, `LISTQ_PREFIX` and
    /// `LISTQ_TIMEOUT_SECS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(val) = env::var("LISTQ_ADDRESS") {
            config.address = val;
        }

        if let Ok(val) = env::var("LISTQ_PORT") {
            config.port = val
                .parse()
                .map_err(|e| QueueError::ConfigError(format!("Invalid LISTQ_PORT: {}", e)))?;
        }

        if let Ok(val) = env::var("LISTQ_PREFIX") {
            config.prefix = val;
        }

        if let Ok(val) = env::var("LISTQ_TIMEOUT_SECS") {
            config.timeout_secs = val.parse().map_err(|e| {
                QueueError::ConfigError(format!("Invalid LISTQ_TIMEOUT_SECS: {}", e))
            })?;
        }

        log::debug!("Loaded client config from environment: {:?}", config);
        Ok(config)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.prefix, "taskqueue");
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert_eq!(config.connect_timeout(), None);
    }
}
