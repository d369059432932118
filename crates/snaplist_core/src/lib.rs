//! Core domain logic for SnapList.
//! Parses shorthand note lines into shelved, structured records.

pub mod legacy;
pub mod logging;
pub mod model;
pub mod parser;
pub mod search;
pub mod service;

pub use legacy::{legacy_shelf, shelf_for_tag, shelf_for_tags};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogSettings};
pub use model::note::{Fields, NoteEdit, NoteEditError, NoteId, NoteRecord, ParsedNote};
pub use model::shelf::{Shelf, ShelfConfigError, ShelfDef, ShelfTable};
pub use parser::{
    extract_fields, extract_hashtags, extract_url, is_bare_url, parse_note, resolve_category,
    NoteParser,
};
pub use search::filter::{browse, filter_by_shelf, search_notes, ShelfCounts, ShelfFilter};
pub use search::suggest::SuggestionIndex;
pub use service::classify::{head_section, ClassificationError, UrlClassification};
pub use service::compose::{compose_raw_line, parse_tag_list};
pub use service::import::{import_export, import_export_file, ExportData, ExportedNote, ImportError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
