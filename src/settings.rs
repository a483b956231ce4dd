//! SettingsStore - persisted user preference flags.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::kv::{read_record_lenient, write_record, KeyValueStore, SETTINGS_KEY};

/// The persisted preference bundle. Fields missing from storage load as false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsRecord {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    pub offline_mode: bool,
}

/// A partial update. Unset fields keep their persisted value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_mode: Option<bool>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dark_mode(mut self, value: bool) -> Self {
        self.dark_mode = Some(value);
        self
    }

    pub fn notifications_enabled(mut self, value: bool) -> Self {
        self.notifications_enabled = Some(value);
        self
    }

    pub fn offline_mode(mut self, value: bool) -> Self {
        self.offline_mode = Some(value);
        self
    }

    pub fn apply(&self, record: SettingsRecord) -> SettingsRecord {
        SettingsRecord {
            dark_mode: self.dark_mode.unwrap_or(record.dark_mode),
            notifications_enabled: self
                .notifications_enabled
                .unwrap_or(record.notifications_enabled),
            offline_mode: self.offline_mode.unwrap_or(record.offline_mode),
        }
    }
}

/// Settings persisted as a JSON object under `settings`.
///
/// Updates are read-merge-write against storage and always write the full
/// record. The cache only changes once the write has succeeded.
pub struct SettingsStore<S> {
    store: S,
    cache: RwLock<Option<SettingsRecord>>,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Current settings, with defaults for anything missing or malformed.
    pub fn get(&self) -> Result<SettingsRecord, StorageError> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| StorageError::LockPoisoned("settings read"))?;
            if let Some(record) = *cache {
                return Ok(record);
            }
        }

        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("settings load"))?;
        let record = self.read_persisted()?.unwrap_or_default();
        *cache = Some(record);
        Ok(record)
    }

    /// Whether a readable settings record exists in storage. A malformed
    /// record counts as absent.
    pub fn is_persisted(&self) -> Result<bool, StorageError> {
        Ok(self.read_persisted()?.is_some())
    }

    /// Merge `patch` onto the persisted record and persist the result.
    ///
    /// Callers outside the crate go through
    /// [`CampusApp::update_settings`](crate::CampusApp::update_settings) so
    /// the theme follows the dark-mode flag.
    pub(crate) fn update(&self, patch: SettingsPatch) -> Result<SettingsRecord, StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("settings update"))?;

        let current = self.read_persisted()?.unwrap_or_default();
        let merged = patch.apply(current);
        if let Err(err) = write_record(&self.store, SETTINGS_KEY, &merged) {
            tracing::error!(key = SETTINGS_KEY, error = %err, "failed to persist settings");
            return Err(err);
        }
        tracing::debug!(?merged, "persisted settings");
        *cache = Some(merged);
        Ok(merged)
    }

    /// Wipe every persisted record (favorites and history included) and
    /// reset this store to defaults. Irreversible. The public reset is
    /// [`CampusApp::clear_all`](crate::CampusApp::clear_all), which also
    /// drops the other stores' caches.
    pub(crate) fn clear_all(&self) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("settings clear"))?;
        if let Err(err) = self.store.clear() {
            tracing::error!(error = %err, "failed to clear storage");
            return Err(err);
        }
        tracing::info!("cleared all persisted state");
        *cache = None;
        Ok(())
    }

    fn read_persisted(&self) -> Result<Option<SettingsRecord>, StorageError> {
        read_record_lenient(&self.store, SETTINGS_KEY)
    }
}
