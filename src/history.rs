//! SearchHistoryStore - bounded, newest-first log of past queries.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::kv::{read_record_lenient, write_record, KeyValueStore, SEARCH_HISTORY_KEY};

/// Maximum number of retained queries.
pub const DEFAULT_HISTORY_CAP: usize = 5;

/// Source of the current time in Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub timestamp: i64,
}

/// Search history persisted as a JSON array under `searchHistory`.
///
/// Repeated queries are recorded again rather than moved to the front.
pub struct SearchHistoryStore<S, C = SystemClock> {
    store: S,
    clock: C,
    cap: usize,
    cache: RwLock<Option<Vec<HistoryEntry>>>,
}

impl<S: KeyValueStore> SearchHistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock, DEFAULT_HISTORY_CAP)
    }
}

impl<S: KeyValueStore, C: Clock> SearchHistoryStore<S, C> {
    pub fn with_clock(store: S, clock: C, cap: usize) -> Self {
        Self {
            store,
            clock,
            cap,
            cache: RwLock::new(None),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Prepend `query` with the current time, trim to the cap and persist.
    /// Blank queries are ignored and return false.
    pub fn record(&self, query: &str) -> Result<bool, StorageError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(false);
        }

        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("history record"))?;

        let mut entries = self.read_persisted()?;
        entries.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                timestamp: self.clock.now_millis(),
            },
        );
        entries.truncate(self.cap);

        if let Err(err) = write_record(&self.store, SEARCH_HISTORY_KEY, &entries) {
            tracing::error!(
                key = SEARCH_HISTORY_KEY,
                error = %err,
                "failed to persist search history"
            );
            return Err(err);
        }
        *cache = Some(entries);
        Ok(true)
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Result<Vec<HistoryEntry>, StorageError> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| StorageError::LockPoisoned("history read"))?;
            if let Some(entries) = cache.as_ref() {
                return Ok(entries.iter().take(n).cloned().collect());
            }
        }

        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("history load"))?;
        let entries = self.read_persisted()?;
        let recent = entries.iter().take(n).cloned().collect();
        *cache = Some(entries);
        Ok(recent)
    }

    pub(crate) fn invalidate(&self) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("history invalidate"))?;
        *cache = None;
        Ok(())
    }

    fn read_persisted(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let mut entries: Vec<HistoryEntry> =
            read_record_lenient(&self.store, SEARCH_HISTORY_KEY)?.unwrap_or_default();
        entries.truncate(self.cap);
        Ok(entries)
    }
}
