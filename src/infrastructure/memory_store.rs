use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;

/// Store that lives for the duration of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
