//! Durable key-value storage.
//!
//! Every persisted record in the crate goes through a [`KeyValueStore`]. The
//! store holds opaque JSON strings; [`read_record`] and [`write_record`] give
//! typed access on top.
//!
//! ## Example
//!
//! ```ignore
//! use campus_nav::kv::{read_record, write_record, InMemoryKeyValueStore, FAVORITES_KEY};
//!
//! let store = InMemoryKeyValueStore::new();
//! write_record(&store, FAVORITES_KEY, &vec!["balme-library".to_string()])?;
//! let ids: Option<Vec<String>> = read_record(&store, FAVORITES_KEY)?;
//! ```

mod file;
mod in_memory;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{MalformedRecordError, RecordError, StorageError};

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Key holding the JSON array of favorite location ids.
pub const FAVORITES_KEY: &str = "favorites";
/// Key holding the JSON settings object.
pub const SETTINGS_KEY: &str = "settings";
/// Key holding the JSON search-history log.
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";

/// Abstract durable key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Read and decode the JSON record under `key`.
pub fn read_record<T, S>(store: &S, key: &str) -> Result<Option<T>, RecordError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|source| MalformedRecordError {
        key: key.to_string(),
        source,
    })?;
    Ok(Some(value))
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_record<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Like [`read_record`], but a malformed record resolves to None.
pub(crate) fn read_record_lenient<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match read_record(store, key) {
        Ok(value) => Ok(value),
        Err(RecordError::Storage(err)) => Err(err),
        Err(RecordError::Malformed(err)) => {
            tracing::warn!(key, error = %err, "discarding malformed record");
            Ok(None)
        }
    }
}
