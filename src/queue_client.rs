use crate::arg::encode_args;
use crate::{
    Arg, ClientConfig, ListStore, QueueError, RedisConnector, Result, StoreConnector, Task,
};
use log::{debug, info, warn};
use serde::Serialize;

/// Observable state of a client's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unestablished,
    Established,
    Failed,
}

enum Connection<S> {
    Unestablished,
    Established(S),
    Failed,
}

/// Value pushed for every enqueued task.
#[derive(Serialize)]
struct EnqueuedRecord<'a> {
    #[serde(rename = "Args")]
    args: &'a [String],
}

/// Producer-side client for a list-backed task queue.
///
/// Tasks are appended to `<prefix>:<type>`; failure records written by
/// workers are read back from `<prefix>:<type>:failed`. The connection is
/// opened on first use. If that attempt fails the client stays failed for
/// the rest of its life and every operation returns `false` / `None`
/// without trying again.
pub struct QueueClient<C: StoreConnector = RedisConnector> {
    config: ClientConfig,
    connector: C,
    connection: Connection<C::Store>,
}

impl QueueClient<RedisConnector> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_connector(config, RedisConnector::new())
    }
}

impl<C: StoreConnector> QueueClient<C> {
    pub fn with_connector(config: ClientConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            connection: Connection::Unestablished,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connection_state(&self) -> ConnectionState {
        match self.connection {
            Connection::Unestablished => ConnectionState::Unestablished,
            Connection::Established(_) => ConnectionState::Established,
            Connection::Failed => ConnectionState::Failed,
        }
    }

    /// Key of the live queue for a task type
    pub fn queue_key(&self, task_type: &str) -> String {
        format!("{}:{}", self.config.prefix, task_type)
    }

    /// Key of the failure queue for a task type
    pub fn failed_key(&self, task_type: &str) -> String {
        format!("{}:{}:failed", self.config.prefix, task_type)
    }

    /// Appends a task to the queue for `task_type`.
    ///
    /// Arguments without an encoding (booleans, `None`, ...) are dropped and
    /// the task is still enqueued. Returns `false` when `task_type` is empty
    /// or the store cannot be reached.
    pub fn enqueue<I, A>(&mut self, task_type: &str, args: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        match self.try_enqueue(task_type, args) {
            Ok(()) => true,
            Err(e) => {
                report(&e);
                false
            }
        }
    }

    /// Enqueues an existing task under its own type. Its arguments are
    /// pushed as they are.
    pub fn enqueue_task(&mut self, task: &Task) -> bool {
        match task.task_type() {
            Some(task_type) => self.enqueue(task_type, task.args().iter().map(Arg::from)),
            None => {
                report(&QueueError::InvalidTaskType(String::new()));
                false
            }
        }
    }

    /// Pops the oldest failure record for `task_type`.
    ///
    /// The returned task always carries `task_type` as its type, whatever the
    /// record says. A record that cannot be decoded is still removed from the
    /// store and `None` is returned.
    pub fn dequeue_failed(&mut self, task_type: &str) -> Option<Task> {
        match self.try_dequeue_failed(task_type) {
            Ok(task) => task,
            Err(e) => {
                report(&e);
                None
            }
        }
    }

    fn try_enqueue<I, A>(&mut self, task_type: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        validate_type(task_type)?;
        let key = self.queue_key(task_type);
        let store = self.connect()?;

        let args = encode_args(args);
        let value = serde_json::to_string(&EnqueuedRecord { args: &args })
            .map_err(|e| QueueError::SerializationError(e.to_string()))?;

        store.push_back(&key, &value)?;
        debug!("Pushed task to {} with {} args", key, args.len());
        Ok(())
    }

    fn try_dequeue_failed(&mut self, task_type: &str) -> Result<Option<Task>> {
        validate_type(task_type)?;
        let key = self.failed_key(task_type);
        let store = self.connect()?;

        let Some(value) = store.pop_front(&key)? else {
            debug!("No failed task in {}", key);
            return Ok(None);
        };

        let mut task = Task::default();
        if let Err(e) = task.merge_json(&value) {
            warn!("Dropped malformed failure record from {}: {}", key, e);
            return Ok(None);
        }
        task.set_type(task_type);

        debug!("Popped failed task from {}", key);
        Ok(Some(task))
    }

    /// Opens the connection on first use. A failed attempt is never retried.
    fn connect(&mut self) -> Result<&mut C::Store> {
        if let Connection::Unestablished = self.connection {
            self.connection = match self.connector.connect(&self.config) {
                Ok(store) => {
                    info!(
                        "Queue client connected to {}:{}",
                        self.config.address, self.config.port
                    );
                    Connection::Established(store)
                }
                Err(e) => {
                    warn!("Queue client failed to connect, giving up: {}", e);
                    Connection::Failed
                }
            };
        }

        match &mut self.connection {
            Connection::Established(store) => Ok(store),
            _ => Err(QueueError::ConnectionUnavailable),
        }
    }
}

fn validate_type(task_type: &str) -> Result<()> {
    if task_type.is_empty() {
        return Err(QueueError::InvalidTaskType(task_type.to_string()));
    }
    Ok(())
}

fn report(error: &QueueError) {
    match error {
        QueueError::InvalidTaskType(_) | QueueError::ConnectionUnavailable => {
            debug!("Queue operation skipped: {}", error)
        }
        _ => warn!("Queue operation failed: {}", error),
    }
}
