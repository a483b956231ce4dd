//! SearchIndex - case-insensitive substring search over a catalog.

use crate::catalog::{Location, LocationCatalog};

/// Search view over a [`LocationCatalog`].
///
/// Unlike [`LocationCatalog::filter_by_category`] with no tag, a blank query
/// matches nothing.
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    catalog: &'a LocationCatalog,
}

impl<'a> SearchIndex<'a> {
    pub fn new(catalog: &'a LocationCatalog) -> Self {
        Self { catalog }
    }

    /// Locations whose name, description or type contains `query`, ignoring
    /// case. Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&'a Location> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.catalog
            .get_all()
            .iter()
            .filter(|location| matches(location, &needle))
            .collect()
    }
}

fn matches(location: &Location, needle: &str) -> bool {
    [&location.name, &location.description, &location.kind]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
