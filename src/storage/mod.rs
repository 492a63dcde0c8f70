//! List-store backends the queue client pushes to and pops from

pub mod memory;
pub mod redis;
pub mod traits;

pub use memory::{MemoryConnector, MemoryStore};
pub use self::redis::{RedisConnector, RedisList};
pub use traits::{ListStore, StoreConnector};
