//! CampusApp - the application context built once at startup.

use std::sync::Arc;

use thiserror::Error;

use crate::capability::{
    AppearanceSource, ColorScheme, NotificationPermissionService, Permission,
};
use crate::catalog::{CatalogError, Location, LocationCatalog, DEFAULT_FEATURED_LIMIT};
use crate::config::{CampusConfig, ConfigError};
use crate::error::StorageError;
use crate::favorites::FavoritesStore;
use crate::history::{SearchHistoryStore, SystemClock, DEFAULT_HISTORY_CAP};
use crate::kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use crate::search::SearchIndex;
use crate::settings::{SettingsPatch, SettingsRecord, SettingsStore};
use crate::theme::{Theme, ThemeState};

/// Storage handle chosen at runtime from configuration.
pub type SharedStore = Arc<dyn KeyValueStore>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the catalog and one instance of every store, all sharing the same
/// [`KeyValueStore`]. Screens get it by reference.
pub struct CampusApp<S = SharedStore> {
    catalog: LocationCatalog,
    favorites: FavoritesStore<S>,
    history: SearchHistoryStore<S, SystemClock>,
    settings: SettingsStore<S>,
    theme: ThemeState,
    appearance: Box<dyn AppearanceSource>,
    featured_limit: usize,
}

impl<S: KeyValueStore + Clone> CampusApp<S> {
    pub fn new<A>(store: S, catalog: LocationCatalog, appearance: A) -> Self
    where
        A: AppearanceSource + 'static,
    {
        Self::with_limits(store, catalog, appearance, DEFAULT_HISTORY_CAP, DEFAULT_FEATURED_LIMIT)
    }

    pub fn with_limits<A>(
        store: S,
        catalog: LocationCatalog,
        appearance: A,
        history_cap: usize,
        featured_limit: usize,
    ) -> Self
    where
        A: AppearanceSource + 'static,
    {
        let settings = SettingsStore::new(store.clone());
        let theme = ThemeState::initialize(&settings, &appearance);
        CampusApp {
            catalog,
            favorites: FavoritesStore::new(store.clone()),
            history: SearchHistoryStore::with_clock(store, SystemClock, history_cap),
            settings,
            theme,
            appearance: Box::new(appearance),
            featured_limit,
        }
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    pub fn search_index(&self) -> SearchIndex<'_> {
        SearchIndex::new(&self.catalog)
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn history(&self) -> &SearchHistoryStore<S, SystemClock> {
        &self.history
    }

    /// Read access to settings. Writes go through
    /// [`update_settings`](Self::update_settings).
    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    /// Home screen featured strip for the selected category.
    pub fn featured(&self, category: Option<&str>) -> Vec<&Location> {
        self.catalog.featured(category, self.featured_limit)
    }

    /// Run a search the user submitted and record it in the history. A
    /// failed history write is logged and does not affect the results.
    pub fn submit_search(&self, query: &str) -> Vec<&Location> {
        if let Err(err) = self.history.record(query) {
            tracing::warn!(error = %err, "search history not saved");
        }
        self.search_index().search(query)
    }

    /// Merge `patch` into the persisted settings and re-derive the theme
    /// from the result.
    ///
    /// The first write of a fresh install keeps the theme currently shown
    /// (possibly from the device appearance) unless `patch` sets dark mode.
    pub fn update_settings(
        &self,
        mut patch: SettingsPatch,
    ) -> Result<SettingsRecord, StorageError> {
        if patch.dark_mode.is_none() && !self.settings.is_persisted()? {
            patch.dark_mode = Some(self.theme.mode().is_dark());
        }
        let record = self.settings.update(patch)?;
        self.theme.follow(&record);
        Ok(record)
    }

    /// Turn notifications on or off. Turning them on asks `service` first;
    /// on denial nothing is written unless the flag has to be forced off.
    pub fn set_notifications(
        &self,
        enabled: bool,
        service: &dyn NotificationPermissionService,
    ) -> Result<Permission, StorageError> {
        if enabled && !service.request_permission().is_granted() {
            tracing::warn!("notification permission denied");
            if self.settings.get()?.notifications_enabled {
                self.update_settings(SettingsPatch::new().notifications_enabled(false))?;
            }
            return Ok(Permission::Denied);
        }
        self.update_settings(SettingsPatch::new().notifications_enabled(enabled))?;
        Ok(Permission::Granted)
    }

    pub fn toggle_theme(&self) -> Result<Theme, StorageError> {
        self.theme.toggle(&self.settings)
    }

    pub fn appearance_changed(&self, scheme: ColorScheme) -> Result<bool, StorageError> {
        self.theme.on_appearance_changed(&self.settings, scheme)
    }

    /// Wipe all persisted state and return every store to fresh-install
    /// defaults. The theme falls back to the device appearance.
    pub fn clear_all(&self) -> Result<(), StorageError> {
        self.settings.clear_all()?;
        self.favorites.invalidate()?;
        self.history.invalidate()?;
        self.theme.refresh(&self.settings, self.appearance.as_ref());
        Ok(())
    }
}

impl CampusApp<SharedStore> {
    /// Build the context described by `config`: file storage when a storage
    /// directory is set, in-memory otherwise.
    pub fn from_config<A>(config: &CampusConfig, appearance: A) -> Result<Self, AppError>
    where
        A: AppearanceSource + 'static,
    {
        let store: SharedStore = match config.storage_dir() {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "using file storage");
                Arc::new(FileKeyValueStore::new(dir))
            }
            None => {
                tracing::warn!("no storage dir configured, state will not survive restarts");
                Arc::new(InMemoryKeyValueStore::new())
            }
        };
        let catalog = match config.catalog_path() {
            Some(path) => LocationCatalog::from_path(path)?,
            None => LocationCatalog::campus(),
        };

        let app = Self::with_limits(
            store,
            catalog,
            appearance,
            config.history_cap(),
            config.featured_limit(),
        );
        app.favorites.load()?;
        Ok(app)
    }
}
