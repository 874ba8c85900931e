use super::errors::DomainError;

/// Client-local key/value persistence, the equivalent of per-browser storage.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
