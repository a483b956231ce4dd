use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::DEFAULT_FEATURED_LIMIT;
use crate::history::DEFAULT_HISTORY_CAP;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level `campus.toml`. Every section is optional.
///
/// ```toml
/// [storage]
/// dir = "~/.local/share/campus"
///
/// [history]
/// cap = 5
///
/// [catalog]
/// path = "locations.json"
/// featured_limit = 5
///
/// [logging]
/// filter = "campus_nav=debug"
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampusConfig {
    pub storage: Option<StorageConfig>,
    pub history: Option<HistoryConfig>,
    pub catalog: Option<CatalogConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted records. In-memory storage when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct HistoryConfig {
    pub cap: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON dataset replacing the bundled campus catalog.
    pub path: Option<PathBuf>,
    pub featured_limit: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl CampusConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage.as_ref()?.dir.as_deref()
    }

    pub fn history_cap(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|h| h.cap)
            .unwrap_or(DEFAULT_HISTORY_CAP)
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog.as_ref()?.path.as_deref()
    }

    pub fn featured_limit(&self) -> usize {
        self.catalog
            .as_ref()
            .and_then(|c| c.featured_limit)
            .unwrap_or(DEFAULT_FEATURED_LIMIT)
    }

    pub fn log_filter(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.filter.as_deref())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }
}
