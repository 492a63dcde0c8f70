use crate::{ClientConfig, Result};

/// An open handle to a store holding named lists of strings.
pub trait ListStore {
    /// Append a value to the tail of the list at `key`
    fn push_back(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove and return the value at the head of the list at `key`
    fn pop_front(&mut self, key: &str) -> Result<Option<String>>;
}

/// Opens [`ListStore`] handles for a client configuration.
pub trait StoreConnector {
    type Store: ListStore;

    /// Open a connection; any error here is a connection failure
    fn connect(&self, config: &ClientConfig) -> Result<Self::Store>;
}
