//! ThemeState - the light/dark palette derived from the dark-mode setting.
//!
//! The theme is not persisted on its own. It is computed from
//! [`SettingsRecord::dark_mode`](crate::settings::SettingsRecord), falling
//! back to the device appearance while no settings have been saved, and
//! finally to light. Subscribers are called synchronously on every change.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::capability::{AppearanceSource, ColorScheme};
use crate::error::StorageError;
use crate::kv::KeyValueStore;
use crate::observers::{Observers, SubscriptionId};
use crate::settings::{SettingsPatch, SettingsRecord, SettingsStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => LIGHT_PALETTE,
            ThemeMode::Dark => DARK_PALETTE,
        }
    }
}

impl From<ColorScheme> for ThemeMode {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ThemeMode::Light,
            ColorScheme::Dark => ThemeMode::Dark,
        }
    }
}

/// Colors consumed by the rendering layer, as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
}

pub const LIGHT_PALETTE: Palette = Palette {
    primary: "#007AFF",
    background: "#FFFFFF",
    card: "#F2F2F7",
    text: "#000000",
    border: "#E5E5EA",
    accent: "#FF9500",
};

pub const DARK_PALETTE: Palette = Palette {
    primary: "#0A84FF",
    background: "#1C1C1E",
    card: "#2C2C2E",
    text: "#FFFFFF",
    border: "#38383A",
    accent: "#FF9F0A",
};

/// The value broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub is_dark_mode: bool,
    pub colors: Palette,
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        Theme {
            is_dark_mode: mode.is_dark(),
            colors: mode.palette(),
        }
    }
}

pub struct ThemeState {
    mode: RwLock<ThemeMode>,
    observers: Observers<Theme>,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        ThemeState {
            mode: RwLock::new(mode),
            observers: Observers::new(),
        }
    }

    /// Build the initial theme from persisted settings, then the device
    /// appearance, then light.
    pub fn initialize<S: KeyValueStore>(
        settings: &SettingsStore<S>,
        appearance: &dyn AppearanceSource,
    ) -> Self {
        let mode = resolve_mode(settings, appearance);
        tracing::debug!(?mode, "initialized theme");
        Self::new(mode)
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Theme {
        Theme::from(self.mode())
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Flip the displayed mode, persist it as the dark-mode setting and
    /// broadcast the new theme. If the write fails nothing changes.
    pub fn toggle<S: KeyValueStore>(
        &self,
        settings: &SettingsStore<S>,
    ) -> Result<Theme, StorageError> {
        let dark = !self.mode().is_dark();
        self.set_dark_mode(settings, dark)
    }

    /// Persist `dark` as the dark-mode setting and apply it.
    pub fn set_dark_mode<S: KeyValueStore>(
        &self,
        settings: &SettingsStore<S>,
        dark: bool,
    ) -> Result<Theme, StorageError> {
        let record = settings.update(SettingsPatch::new().dark_mode(dark))?;
        self.follow(&record);
        Ok(self.current())
    }

    /// Apply the dark-mode flag of a record that was just persisted.
    pub(crate) fn follow(&self, record: &SettingsRecord) -> bool {
        self.apply(ThemeMode::from_dark_mode(record.dark_mode))
    }

    /// Follow a device appearance change, but only while the user has no
    /// saved settings. Returns true if the theme changed.
    pub fn on_appearance_changed<S: KeyValueStore>(
        &self,
        settings: &SettingsStore<S>,
        scheme: ColorScheme,
    ) -> Result<bool, StorageError> {
        if settings.is_persisted()? {
            return Ok(false);
        }
        Ok(self.apply(ThemeMode::from(scheme)))
    }

    /// Re-derive the theme from storage, e.g. after a reset.
    pub fn refresh<S: KeyValueStore>(
        &self,
        settings: &SettingsStore<S>,
        appearance: &dyn AppearanceSource,
    ) -> bool {
        self.apply(resolve_mode(settings, appearance))
    }

    /// Switch to `mode`, notifying subscribers if it differs from the
    /// current one.
    fn apply(&self, mode: ThemeMode) -> bool {
        {
            let mut current = self.mode.write().unwrap_or_else(PoisonError::into_inner);
            if *current == mode {
                return false;
            }
            *current = mode;
        }
        let notified = self.observers.notify(&Theme::from(mode));
        tracing::debug!(?mode, notified, "theme changed");
        true
    }
}

fn resolve_mode<S: KeyValueStore>(
    settings: &SettingsStore<S>,
    appearance: &dyn AppearanceSource,
) -> ThemeMode {
    let persisted = settings
        .is_persisted()
        .and_then(|persisted| persisted.then(|| settings.get()).transpose());
    match persisted {
        Ok(Some(record)) => ThemeMode::from_dark_mode(record.dark_mode),
        Ok(None) => appearance.color_scheme().map(ThemeMode::from).unwrap_or_default(),
        Err(err) => {
            tracing::warn!(error = %err, "settings unavailable, using device appearance");
            appearance.color_scheme().map(ThemeMode::from).unwrap_or_default()
        }
    }
}
