use std::cell::RefCell;
use std::collections::HashMap;

use crate::backend::interface::{KeyValueStore, Result};

/// Volatile store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RefCell<HashMap<String, String>>
}

impl MemoryKeyValueStore {
    pub fn new() -> MemoryKeyValueStore {
        MemoryKeyValueStore::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
