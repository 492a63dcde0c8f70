//! A producer client for a task queue kept in Redis lists.
//!
//! # Features
//!
//! - **Typed arguments**: strings and numbers travel as plain text, JSON
//!   objects and arrays as base64-wrapped JSON
//! - **Failure inspection**: pop the records a worker marked as failed
//! - **Fail-fast connections**: connects lazily, and a failed attempt is
//!   never retried by the same client
//! - **Pluggable storage**: Redis or an in-process store behind one trait
//!
//! Tasks of type `resize` go to the list `<prefix>:resize` as
//! `{"Args": [...]}`. A worker that fails a task pushes
//! `{"Type": .., "Args": [..], "ErrorMessage": ..}` onto
//! `<prefix>:resize:failed`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use listq::{ClientConfig, QueueClient, args};
//! use serde_json::json;
//!
//! let mut client = QueueClient::new(
//!     ClientConfig::default()
//!         .with_address("10.10.10.10")
//!         .with_prefix("jobs"),
//! );
//!
//! // Pushes {"Args":["img1.png","42","eyJ3aWR0aCI6MTAwfQ=="]} onto jobs:resize
//! if !client.enqueue("resize", args!["img1.png", 42, json!({"width": 100})]) {
//!     eprintln!("task was not enqueued");
//! }
//!
//! while let Some(task) = client.dequeue_failed("resize") {
//!     println!("{:?} failed: {}", task.args(), task.error_message());
//! }
//! ```

pub mod arg;
pub mod config;
pub mod error;
pub mod queue_client;
pub mod storage;
pub mod task;

pub use arg::{Arg, Number};
pub use config::ClientConfig;
pub use error::{QueueError, Result};
pub use queue_client::{ConnectionState, QueueClient};
pub use storage::{
    ListStore, MemoryConnector, MemoryStore, RedisConnector, RedisList, StoreConnector,
};
pub use task::Task;
