use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Connection unavailable: an earlier connection attempt failed")]
    ConnectionUnavailable,

    #[error("Invalid task type: {0:?}")]
    InvalidTaskType(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, QueueError>;

impl From<redis::RedisError> for QueueError {
    fn from(value: redis::RedisError) -> Self {
        QueueError::StorageError(value.to_string())
    }
}
