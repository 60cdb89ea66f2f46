//! In-memory blob store for tests and ephemeral runs.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

use super::StorageAdapter;

/// HashMap-backed adapter. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryAdapter {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
