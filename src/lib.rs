//! Application state and persistence core for a campus navigator.
//!
//! The catalog and search are pure reads over an immutable dataset. Favorites,
//! settings and search history are small records kept in a
//! [`KeyValueStore`](kv::KeyValueStore); the theme is derived from settings.
//! [`CampusApp`] wires them together.

pub mod app;
pub mod capability;
pub mod catalog;
pub mod config;
mod error;
pub mod favorites;
pub mod history;
pub mod kv;
mod observers;
pub mod search;
pub mod settings;
pub mod telemetry;
pub mod theme;

pub use app::{AppError, CampusApp, SharedStore};
pub use capability::{
    locate_device, AppearanceSource, ColorScheme, DevicePosition, FixedAppearance,
    FixedPermission, GeolocationProvider, NotificationPermissionService, Permission,
    PositionError,
};
pub use catalog::{CatalogError, Category, Coordinates, Location, LocationCatalog};
pub use config::{CampusConfig, ConfigError};
pub use error::{MalformedRecordError, RecordError, StorageError};
pub use favorites::FavoritesStore;
pub use history::{Clock, HistoryEntry, SearchHistoryStore, SystemClock};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use observers::{Observers, SubscriptionId};
pub use search::SearchIndex;
pub use settings::{SettingsPatch, SettingsRecord, SettingsStore};
pub use theme::{Palette, Theme, ThemeMode, ThemeState, DARK_PALETTE, LIGHT_PALETTE};
