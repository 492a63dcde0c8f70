//! In-process list store for tests and local development

use crate::{ClientConfig, ListStore, QueueError, Result, StoreConnector};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Named lists shared between every handle cloned from the same store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    lists: Arc<Mutex<HashMap<String, VecDeque<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers a poisoned lock. Every mutation is a single push or pop, so
    /// the lists are never left half-updated.
    fn lists(&self) -> MutexGuard<'_, HashMap<String, VecDeque<String>>> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the list at `key`, head first
    pub fn list(&self, key: &str) -> Vec<String> {
        self.lists()
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, key: &str) -> usize {
        self.lists().get(key).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    /// Every key that currently holds at least one entry
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lists().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ListStore for MemoryStore {
    fn push_back(&mut self, key: &str, value: &str) -> Result<()> {
        self.lists()
            .entry(key.to_string())
            .or_default()
            .push_back(value.to_string());
        Ok(())
    }

    fn pop_front(&mut self, key: &str) -> Result<Option<String>> {
        let mut lists = self.lists();
        let value = lists.get_mut(key).and_then(VecDeque::pop_front);

        // Redis drops a list once its last element is popped
        if lists.get(key).is_some_and(VecDeque::is_empty) {
            lists.remove(key);
        }

        Ok(value)
    }
}

/// Hands out handles to one [`MemoryStore`] and counts connection attempts.
#[derive(Clone, Debug, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
    attempts: Arc<AtomicUsize>,
    unreachable: Arc<AtomicBool>,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    /// A connector whose every connection attempt fails.
    pub fn unreachable() -> Self {
        let connector = Self::default();
        connector.set_unreachable(true);
        connector
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn connect_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl StoreConnector for MemoryConnector {
    type Store = MemoryStore;

    fn connect(&self, config: &ClientConfig) -> Result<MemoryStore> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.unreachable.load(Ordering::SeqCst) {
            return Err(QueueError::ConnectionError(format!(
                "{}:{} unreachable",
                config.address, config.port
            )));
        }

        Ok(self.store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_fifo() {
        let mut store = MemoryStore::new();
        store.push_back("q", "a").unwrap();
        store.push_back("q", "b").unwrap();

        assert_eq!(store.list("q"), vec!["a", "b"]);
        assert_eq!(store.pop_front("q").unwrap().as_deref(), Some("a"));
        assert_eq!(store.pop_front("q").unwrap().as_deref(), Some("b"));
        assert_eq!(store.pop_front("q").unwrap(), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn poisoned_store_keeps_its_contents() {
        let mut store = MemoryStore::new();
        store.push_back("q", "a").unwrap();

        let holder = store.clone();
        let result = std::thread::spawn(move || {
            let _guard = holder.lists.lock().unwrap();
            panic!("worker died holding the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(store.lists.is_poisoned());

        assert_eq!(store.list("q"), vec!["a"]);
        assert_eq!(store.len("q"), 1);
        assert_eq!(store.keys(), vec!["q"]);

        store.push_back("q", "b").unwrap();
        assert_eq!(store.pop_front("q").unwrap().as_deref(), Some("a"));
        assert_eq!(store.list("q"), vec!["b"]);
    }

    #[test]
    fn handles_share_lists() {
        let connector = MemoryConnector::default();
        let mut handle = connector.connect(&ClientConfig::default()).unwrap();
        handle.push_back("q", "a").unwrap();

        assert_eq!(connector.store().len("q"), 1);
        assert_eq!(connector.connect_attempts(), 1);
    }

    #[test]
    fn unreachable_connector_fails() {
        let connector = MemoryConnector::unreachable();
        assert!(connector.connect(&ClientConfig::default()).is_err());
        assert_eq!(connector.connect_attempts(), 1);
    }
}
