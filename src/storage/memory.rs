//! In-process key/value storage.

use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::SessionError;
use crate::Result;

/// Thread-safe in-memory storage.
///
/// Values live as long as the instance does. Share it behind an `Arc` to
/// model a medium that outlives one manager.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SessionError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SessionError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let storage = MemoryStorage::new();
        assert!(storage.get("missing").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let storage = MemoryStorage::new();
        storage.set("k", "one").unwrap();
        storage.set("k", "two").unwrap();

        assert_eq!(storage.get("k").unwrap(), Some("two".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("missing").is_ok());

        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;
        use std::thread;

        let storage = Arc::new(MemoryStorage::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || storage.set(&format!("key-{}", i), "v").unwrap())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(storage.len(), 50);
    }
}
