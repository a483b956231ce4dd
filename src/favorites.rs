//! FavoritesStore - the persisted set of favorite location ids.

use std::sync::RwLock;

use crate::catalog::{Location, LocationCatalog};
use crate::error::StorageError;
use crate::kv::{read_record_lenient, write_record, KeyValueStore, FAVORITES_KEY};

/// Persisted favorite ids, stored as a JSON array under `favorites`.
///
/// The in-memory set is a cache. It is filled from storage on first access
/// and replaced only after a write has succeeded, so a failed write leaves it
/// at the last persisted value. Ids are not validated against the catalog;
/// stale ids stay in storage and are skipped by [`favorite_locations`].
///
/// [`favorite_locations`]: FavoritesStore::favorite_locations
pub struct FavoritesStore<S> {
    store: S,
    cache: RwLock<Option<Vec<String>>>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Read the persisted set into the cache. An absent or malformed record
    /// yields an empty set.
    pub fn load(&self) -> Result<Vec<String>, StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("favorites load"))?;
        let ids = self.read_persisted()?;
        tracing::debug!(count = ids.len(), "loaded favorites");
        *cache = Some(ids.clone());
        Ok(ids)
    }

    /// Favorite ids in the order they were added.
    pub fn ids(&self) -> Result<Vec<String>, StorageError> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|_| StorageError::LockPoisoned("favorites read"))?;
            if let Some(ids) = cache.as_ref() {
                return Ok(ids.clone());
            }
        }
        self.load()
    }

    pub fn is_favorite(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.ids()?.iter().any(|f| f == id))
    }

    /// Flip membership of `id` and persist. Returns the new membership.
    pub fn toggle(&self, id: &str) -> Result<bool, StorageError> {
        self.mutate("favorites toggle", |ids| match ids.iter().position(|f| f == id) {
            Some(pos) => {
                ids.remove(pos);
                Some(false)
            }
            None => {
                ids.push(id.to_string());
                Some(true)
            }
        })
        .map(|member| member.unwrap_or(false))
    }

    /// Remove `id` if present. Returns true if it was a member.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        self.mutate("favorites remove", |ids| {
            let pos = ids.iter().position(|f| f == id)?;
            ids.remove(pos);
            Some(true)
        })
        .map(|removed| removed.unwrap_or(false))
    }

    /// Favorites resolved against `catalog`, skipping ids it no longer has.
    pub fn favorite_locations<'c>(
        &self,
        catalog: &'c LocationCatalog,
    ) -> Result<Vec<&'c Location>, StorageError> {
        Ok(self
            .ids()?
            .iter()
            .filter_map(|id| catalog.get_by_id(id))
            .collect())
    }

    /// Drop the cache so the next access reloads from storage.
    pub(crate) fn invalidate(&self) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("favorites invalidate"))?;
        *cache = None;
        Ok(())
    }

    /// Read-merge-write: `apply` edits the persisted list and returns Some
    /// when it changed something worth writing.
    fn mutate<T>(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&mut Vec<String>) -> Option<T>,
    ) -> Result<Option<T>, StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned(operation))?;

        let mut ids = self.read_persisted()?;
        let Some(outcome) = apply(&mut ids) else {
            *cache = Some(ids);
            return Ok(None);
        };

        if let Err(err) = write_record(&self.store, FAVORITES_KEY, &ids) {
            tracing::error!(key = FAVORITES_KEY, error = %err, "failed to persist favorites");
            return Err(err);
        }
        tracing::debug!(count = ids.len(), "persisted favorites");
        *cache = Some(ids);
        Ok(Some(outcome))
    }

    fn read_persisted(&self) -> Result<Vec<String>, StorageError> {
        let ids: Vec<String> = read_record_lenient(&self.store, FAVORITES_KEY)?.unwrap_or_default();
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKeyValueStore;

    fn persisted(store: &InMemoryKeyValueStore) -> Option<String> {
        store.get(FAVORITES_KEY).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let kv = InMemoryKeyValueStore::new();
        let favorites = FavoritesStore::new(kv.clone());

        assert!(favorites.toggle("1").unwrap());
        assert!(favorites.is_favorite("1").unwrap());
        assert_eq!(persisted(&kv).as_deref(), Some(r#"["1"]"#));

        assert!(!favorites.toggle("1").unwrap());
        assert!(!favorites.is_favorite("1").unwrap());
        assert_eq!(persisted(&kv).as_deref(), Some("[]"));
    }

    #[test]
    fn absent_record_loads_empty() {
        let favorites = FavoritesStore::new(InMemoryKeyValueStore::new());
        assert!(favorites.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_record_loads_empty_and_is_rewritten() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(FAVORITES_KEY, r#"{"oops":true}"#).unwrap();
        let favorites = FavoritesStore::new(kv.clone());

        assert!(favorites.load().unwrap().is_empty());
        favorites.toggle("great-hall").unwrap();
        assert_eq!(persisted(&kv).as_deref(), Some(r#"["great-hall"]"#));
    }

    #[test]
    fn failed_write_rolls_back_cache() {
        let kv = InMemoryKeyValueStore::new();
        let favorites = FavoritesStore::new(kv.clone());
        favorites.toggle("a").unwrap();

        kv.fail_writes(true);
        assert!(favorites.toggle("b").is_err());
        assert!(favorites.toggle("a").is_err());

        assert_eq!(favorites.ids().unwrap(), vec!["a"]);
        assert_eq!(persisted(&kv).as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn toggle_merges_with_external_writes() {
        let kv = InMemoryKeyValueStore::new();
        let favorites = FavoritesStore::new(kv.clone());
        favorites.toggle("a").unwrap();

        kv.set(FAVORITES_KEY, r#"["a","b"]"#).unwrap();
        favorites.toggle("c").unwrap();

        assert_eq!(favorites.ids().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_non_member_does_not_write() {
        let kv = InMemoryKeyValueStore::new();
        let favorites = FavoritesStore::new(kv.clone());

        assert!(!favorites.remove("ghost").unwrap());
        assert!(persisted(&kv).is_none());

        favorites.toggle("x").unwrap();
        assert!(favorites.remove("x").unwrap());
        assert_eq!(persisted(&kv).as_deref(), Some("[]"));
    }

    #[test]
    fn stale_ids_are_kept_but_filtered() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(FAVORITES_KEY, r#"["demolished","balme-library"]"#).unwrap();
        let favorites = FavoritesStore::new(kv.clone());
        let catalog = LocationCatalog::campus();

        let locations = favorites.favorite_locations(&catalog).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id, "balme-library");
        assert_eq!(favorites.ids().unwrap(), vec!["demolished", "balme-library"]);
    }

    #[test]
    fn duplicate_persisted_ids_collapse() {
        let kv = InMemoryKeyValueStore::new();
        kv.set(FAVORITES_KEY, r#"["a","a","b"]"#).unwrap();
        let favorites = FavoritesStore::new(kv);
        assert_eq!(favorites.load().unwrap(), vec!["a", "b"]);
    }
}
