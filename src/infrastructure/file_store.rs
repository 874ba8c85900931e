use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::ports::KeyValueStore;

/// JSON-file backed store. The whole file is one object of string values and
/// is rewritten after every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    fn read_file(&self) -> Result<BTreeMap<String, String>, DomainError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => Ok(entries),
                Err(e) => {
                    log::warn!(
                        "discarding unreadable state file {}: {}",
                        self.path.display(),
                        e
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(DomainError::Internal(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| {
            DomainError::Internal(format!("cannot write {}: {}", self.path.display(), e))
        })
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool),
    ) -> Result<T, DomainError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if guard.is_none() {
            *guard = Some(self.read_file()?);
        }
        let current = guard.get_or_insert_with(BTreeMap::new);
        let mut next = current.clone();
        let (value, dirty) = f(&mut next);
        if dirty {
            self.write_file(&next)?;
            *current = next;
        }
        Ok(value)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.with_entries(|entries| (entries.get(key).cloned(), false))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
            ((), true)
        })
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.with_entries(|entries| {
            let existed = entries.remove(key).is_some();
            ((), existed)
        })
    }
}
