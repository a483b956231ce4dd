//! Shared catalog and app fixtures.

use campus_nav::{
    CampusApp, Coordinates, FixedAppearance, InMemoryKeyValueStore, Location, LocationCatalog,
};

pub fn location(id: &str, name: &str, kind: &str, description: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        kind: kind.to_string(),
        category: kind.to_string(),
        description: description.to_string(),
        coordinates: Coordinates::new(-0.1962, 5.6502),
    }
}

/// Small catalog whose first entry is `{id: "1", name: "Balme Library"}`.
pub fn small_catalog() -> LocationCatalog {
    LocationCatalog::from_locations(vec![
        location("1", "Balme Library", "academic", "Main University Library"),
        location("2", "Great Hall", "academic", "Main Auditorium"),
        location("3", "Sports Complex", "sports", "University Sports Complex"),
    ])
    .unwrap()
}

pub fn app() -> (InMemoryKeyValueStore, CampusApp<InMemoryKeyValueStore>) {
    let kv = InMemoryKeyValueStore::new();
    let app = CampusApp::new(kv.clone(), small_catalog(), FixedAppearance(None));
    (kv, app)
}
