//! In-memory search, shelf filtering and per-shelf counts.
//!
//! # Invariants
//! - Result order follows input order; nothing is re-ranked.
//! - A non-blank query searches across all shelves, ignoring the filter.
//! - Shelf membership is read through the legacy-aware [`NoteRecord::shelf`].

use crate::model::note::NoteRecord;
use crate::model::shelf::Shelf;
use std::collections::BTreeMap;

/// Shelf tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShelfFilter {
    #[default]
    All,
    Only(Shelf),
}

impl ShelfFilter {
    /// Returns whether `note` belongs to this selection.
    pub fn matches(self, note: &NoteRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(shelf) => note.shelf() == shelf,
        }
    }
}

/// Keeps notes whose searchable text contains every whitespace-separated
/// query term (case-insensitive substring match). A blank query keeps all.
pub fn search_notes<'a>(notes: &'a [NoteRecord], query: &str) -> Vec<&'a NoteRecord> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return notes.iter().collect();
    }

    notes
        .iter()
        .filter(|note| {
            let haystack = searchable_text(note);
            terms.iter().all(|term| haystack.contains(*term))
        })
        .collect()
}

/// Keeps notes on the selected shelf.
pub fn filter_by_shelf(notes: &[NoteRecord], filter: ShelfFilter) -> Vec<&NoteRecord> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}

/// Notes visible for a shelf tab plus search box state.
pub fn browse<'a>(notes: &'a [NoteRecord], filter: ShelfFilter, query: &str) -> Vec<&'a NoteRecord> {
    if query.trim().is_empty() {
        filter_by_shelf(notes, filter)
    } else {
        search_notes(notes, query)
    }
}

/// Note totals for shelf tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfCounts {
    pub all: usize,
    pub per_shelf: BTreeMap<Shelf, usize>,
}

impl ShelfCounts {
    /// Counts notes per effective shelf.
    pub fn tally(notes: &[NoteRecord]) -> Self {
        let mut per_shelf = BTreeMap::new();
        for note in notes {
            *per_shelf.entry(note.shelf()).or_insert(0) += 1;
        }
        Self {
            all: notes.len(),
            per_shelf,
        }
    }

    /// Count for one shelf; zero when absent.
    pub fn get(&self, shelf: Shelf) -> usize {
        self.per_shelf.get(&shelf).copied().unwrap_or(0)
    }
}

fn searchable_text(note: &NoteRecord) -> String {
    let mut pieces: Vec<&str> = vec![note.title.as_str(), note.notes.as_str(), note.raw.as_str()];
    pieces.extend(note.tags.iter().map(String::as_str));
    pieces.push(note.shelf().key());
    pieces.extend(note.hash_tags.iter().map(String::as_str));
    pieces.extend(note.fields.keys().map(String::as_str));
    pieces.extend(note.fields.values().map(String::as_str));
    pieces.join(" ").to_lowercase()
}
