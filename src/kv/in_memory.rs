//! InMemoryKeyValueStore - HashMap-backed store for testing and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::KeyValueStore;
use crate::error::StorageError;

/// In-memory key-value store backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same storage, which is how a
/// single platform store is handed to every component.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<RwLock<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`, `remove` and `clear` fail with
    /// [`StorageError::Unavailable`] until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("get"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("set"))?;
        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;
        Ok(storage.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("clear"))?;
        storage.clear();
        Ok(())
    }
}
