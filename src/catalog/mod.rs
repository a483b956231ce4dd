//! LocationCatalog - the immutable set of campus locations.
//!
//! A catalog is built once (from the bundled campus dataset or a JSON file)
//! and never mutated afterwards. Every query borrows from it and preserves
//! insertion order.

mod campus;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of locations shown in the home screen "featured" strip.
pub const DEFAULT_FEATURED_LIMIT: usize = 5;

/// A (longitude, latitude) pair. Serialized as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.longitude, c.latitude)
    }
}

/// A single campus location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub coordinates: Coordinates,
}

/// Entry in the category directory shown as filter chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate location id {0:?}")]
    DuplicateId(String),
    #[error("failed to parse location dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read location dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable, ordered catalog of locations.
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    locations: Vec<Location>,
    categories: Vec<Category>,
}

impl LocationCatalog {
    /// The bundled University of Ghana campus dataset.
    pub fn campus() -> Self {
        Self {
            locations: campus::locations(),
            categories: campus::categories(),
        }
    }

    /// Build a catalog from `locations`, rejecting duplicate ids. Uses the
    /// bundled category directory.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !seen.insert(location.id.as_str()) {
                return Err(CatalogError::DuplicateId(location.id.clone()));
            }
        }
        Ok(Self {
            locations,
            categories: campus::categories(),
        })
    }

    /// Parse a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Self::from_locations(locations)
    }

    /// Load a JSON dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            locations = catalog.len(),
            "loaded location dataset"
        );
        Ok(catalog)
    }

    /// Every location, in catalog order.
    pub fn get_all(&self) -> &[Location] {
        &self.locations
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Locations whose category equals `category`. `None` matches everything.
    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<&Location> {
        match category {
            Some(tag) => self.locations.iter().filter(|l| l.category == tag).collect(),
            None => self.locations.iter().collect(),
        }
    }

    /// The first `limit` locations of [`filter_by_category`](Self::filter_by_category).
    pub fn featured(&self, category: Option<&str>, limit: usize) -> Vec<&Location> {
        let mut locations = self.filter_by_category(category);
        locations.truncate(limit);
        locations
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::campus()
    }
}
