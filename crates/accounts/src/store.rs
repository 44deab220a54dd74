//! Key-value storage seam.
//!
//! [`KeyValueStore`] stands in for the browser's local storage. The only
//! shipped implementation is the process-local [`MemoryStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AccountError;

/// String-keyed, string-valued storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AccountError>;

    fn set(&self, key: &str, value: String) -> Result<(), AccountError>;

    /// Remove a key, returning its previous value.
    fn remove(&self, key: &str) -> Result<Option<String>, AccountError>;
}

/// In-memory store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AccountError {
    AccountError::Storage("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AccountError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), AccountError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<Option<String>, AccountError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(entries.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").expect("get"), None);

        store.set("k", "v1".to_string()).expect("set");
        store.set("k", "v2".to_string()).expect("overwrite");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v2"));

        assert_eq!(store.remove("k").expect("remove").as_deref(), Some("v2"));
        assert_eq!(store.get("k").expect("get"), None);
    }
}
