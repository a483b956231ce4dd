//! FileKeyValueStore - one JSON file per key inside a data directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;

use super::KeyValueStore;
use crate::error::StorageError;

const EXTENSION: &str = "json";

/// Directory-backed durable store.
///
/// Each key maps to `<dir>/<key>.json`. Writes go to a temp file in the same
/// directory and are renamed over the target, so a reader never sees a
/// half-written record. Clones share the same write lock.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileKeyValueStore {
    /// Open a store rooted at `dir`. The directory is created lazily on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("set"))?;

        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| Self::io_error(key, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| Self::io_error(key, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| Self::io_error(key, e))?;
        tmp.persist(&path).map_err(|e| Self::io_error(key, e.error))?;

        tracing::debug!(key, path = %path.display(), "persisted record");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("remove"))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("clear"))?;

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(Self::io_error("*", e)),
        };

        for entry in entries {
            let path = entry.map_err(|e| Self::io_error("*", e))?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                fs::remove_file(&path).map_err(|e| Self::io_error("*", e))?;
            }
        }
        tracing::debug!(dir = %self.dir.display(), "cleared store");
        Ok(())
    }
}
