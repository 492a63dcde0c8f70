use crate::{ClientConfig, ListStore, QueueError, Result, StoreConnector};
use log::info;
use redis::{Client, Commands, Connection, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

/// Connects to Redis with the synchronous client.
#[derive(Clone, Debug, Default)]
pub struct RedisConnector;

impl RedisConnector {
    pub fn new() -> Self {
        Self
    }
}

/// TCP connection info for the configured host and port. The address is
/// used verbatim as a host name, never parsed as a URL.
pub fn connection_info(config: &ClientConfig) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.address.clone(), config.port),
        redis: RedisConnectionInfo::default(),
    }
}

impl StoreConnector for RedisConnector {
    type Store = RedisList;

    fn connect(&self, config: &ClientConfig) -> Result<RedisList> {
        let endpoint = format!("{}:{}", config.address, config.port);
        let client = Client::open(connection_info(config))
            .map_err(|e| QueueError::ConnectionError(format!("{}: {}", endpoint, e)))?;

        let connection = match config.connect_timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
        .map_err(|e| QueueError::ConnectionError(format!("{}: {}", endpoint, e)))?;

        info!("Connected to Redis at {}", endpoint);
        Ok(RedisList { connection })
    }
}

/// Redis lists: `RPUSH` to append, `LPOP` to take the oldest entry.
pub struct RedisList {
    connection: Connection,
}

impl ListStore for RedisList {
    fn push_back(&mut self, key: &str, value: &str) -> Result<()> {
        let _: i64 = self.connection.rpush(key, value)?;
        Ok(())
    }

    fn pop_front(&mut self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self.connection.lpop(key, None)?;
        Ok(value)
    }
}
