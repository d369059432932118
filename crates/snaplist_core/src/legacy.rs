//! Legacy category remapping for records written before shelves existed.
//!
//! Older records stored one of the category keys `book`, `movie`, `show`,
//! `restaurant`, `drink`, `activity`, `other` as their first tag, sometimes
//! followed by a subtype key (`beer`, `wine`, `cocktail`, `hike`, `concert`,
//! `museum`, `theater`). This adapter maps those onto the current
//! [`Shelf`] set; it is never consulted by the line parser itself.
//!
//! # Invariants
//! - A current shelf key always wins over a legacy key of the same spelling.
//! - Lookup is case-insensitive and whitespace-insensitive.
//! - Unknown tags degrade to [`Shelf::Other`].

use crate::model::shelf::{Shelf, ShelfTable};

const LEGACY_KEYS: &[(&str, Shelf)] = &[
    ("book", Shelf::Read),
    ("movie", Shelf::Watch),
    ("show", Shelf::Watch),
    ("restaurant", Shelf::Eat),
    ("drink", Shelf::Eat),
    ("beer", Shelf::Eat),
    ("wine", Shelf::Eat),
    ("cocktail", Shelf::Eat),
    ("activity", Shelf::Do),
    ("hike", Shelf::Do),
    ("concert", Shelf::Do),
    ("museum", Shelf::Do),
    ("theater", Shelf::Do),
    ("other", Shelf::Other),
];

/// Maps one legacy category or subtype key to its current shelf.
pub fn legacy_shelf(key: &str) -> Option<Shelf> {
    let normalized = key.trim().to_lowercase();
    LEGACY_KEYS
        .iter()
        .find(|(legacy, _)| *legacy == normalized)
        .map(|(_, shelf)| *shelf)
}

/// Resolves a stored tag to a shelf.
///
/// Precedence: current shelf key, then legacy key, then the alias table,
/// then [`Shelf::Other`].
pub fn shelf_for_tag(tag: &str, table: &ShelfTable) -> Shelf {
    if let Some(shelf) = Shelf::from_key(tag) {
        return shelf;
    }
    if let Some(shelf) = legacy_shelf(tag) {
        return shelf;
    }
    table
        .lookup_alias(&tag.trim().to_lowercase())
        .unwrap_or(Shelf::Other)
}

/// Resolves a stored record's tag list; only the first tag is primary.
pub fn shelf_for_tags(tags: &[String], table: &ShelfTable) -> Shelf {
    tags.first()
        .map(|tag| shelf_for_tag(tag, table))
        .unwrap_or(Shelf::Other)
}
