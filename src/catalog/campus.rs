//! Bundled University of Ghana (Legon) dataset.

use super::{Category, Coordinates, Location};

const LOCATIONS: &[(&str, &str, &str, (f64, f64), &str, &str)] = &[
    // Academic buildings
    (
        "balme-library",
        "Balme Library",
        "academic",
        (-0.1962, 5.6502),
        "Main University Library",
        "academic",
    ),
    (
        "great-hall",
        "Great Hall",
        "academic",
        (-0.1965, 5.6505),
        "Main Auditorium",
        "academic",
    ),
    (
        "computer-science",
        "Department of Computer Science",
        "academic",
        (-0.1960, 5.6500),
        "Computer Science Department",
        "academic",
    ),
    // Halls of residence
    (
        "legon-hall",
        "Legon Hall",
        "residence",
        (-0.1968, 5.6508),
        "Legon Hall of Residence",
        "residence",
    ),
    (
        "commonwealth-hall",
        "Commonwealth Hall",
        "residence",
        (-0.1969, 5.6509),
        "Commonwealth Hall of Residence",
        "residence",
    ),
    // Administration
    (
        "jubilee-house",
        "Jubilee House",
        "administrative",
        (-0.1963, 5.6503),
        "Vice Chancellor's Office",
        "administrative",
    ),
    (
        "registrar-office",
        "Registrar's Office",
        "administrative",
        (-0.1964, 5.6504),
        "University Registrar's Office",
        "administrative",
    ),
    // Sports
    (
        "sports-stadium",
        "Sports Stadium",
        "sports",
        (-0.1970, 5.6510),
        "University Sports Stadium",
        "sports",
    ),
    (
        "sports-complex",
        "Sports Complex",
        "sports",
        (-0.1971, 5.6511),
        "University Sports Complex",
        "sports",
    ),
    // Dining and shopping
    (
        "legon-dining",
        "Legon Hall Dining Hall",
        "dining",
        (-0.1972, 5.6512),
        "Legon Hall Dining Hall",
        "dining",
    ),
    (
        "shopping-mall",
        "Legon Shopping Mall",
        "shopping",
        (-0.1973, 5.6513),
        "University Shopping Mall",
        "shopping",
    ),
    // Health
    (
        "university-hospital",
        "University Hospital",
        "health",
        (-0.1974, 5.6514),
        "University Hospital",
        "health",
    ),
    (
        "university-clinic",
        "University Clinic",
        "health",
        (-0.1975, 5.6515),
        "University Clinic",
        "health",
    ),
    // Religious
    (
        "university-chapel",
        "University Chapel",
        "religious",
        (-0.1976, 5.6516),
        "University Chapel",
        "religious",
    ),
    (
        "university-mosque",
        "University Mosque",
        "religious",
        (-0.1977, 5.6517),
        "University Mosque",
        "religious",
    ),
];

const CATEGORIES: &[(&str, &str)] = &[
    (
        "academic",
        "Academic Buildings",
    ),
    (
        "residence",
        "Halls of Residence",
    ),
    (
        "administrative",
        "Administrative Buildings",
    ),
    (
        "sports",
        "Sports and Recreation",
    ),
    (
        "dining",
        "Dining and Shopping",
    ),
    (
        "health",
        "Health and Wellness",
    ),
    (
        "religious",
        "Religious Facilities",
    ),
    (
        "other",
        "Other Facilities",
    ),
];

pub(super) fn locations() -> Vec<Location> {
    LOCATIONS
        .iter()
        .map(|&(id, name, kind, coordinates, description, category)| Location {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            coordinates: Coordinates::from(coordinates),
        })
        .collect()
}

pub(super) fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}
