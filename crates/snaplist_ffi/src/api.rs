//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose parsing, shelf enumeration and URL-review helpers to Dart via FRB.
//! - Flatten core types into FFI-friendly records (strings and vectors).
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Shelf values cross the boundary as their lowercase keys.

use log::warn;
use snaplist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    is_bare_url as is_bare_url_inner, parse_note as parse_note_inner, ping as ping_inner,
    shelf_for_tags as shelf_for_tags_inner, ParsedNote, ShelfTable, UrlClassification,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One `key:value` pair of a parsed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub key: String,
    pub value: String,
}

/// Parsed note, flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNoteView {
    /// Shelf key (`read|watch|eat|do|buy|other`).
    pub category: String,
    pub title: String,
    /// Sorted by key.
    pub fields: Vec<FieldEntry>,
    pub hash_tags: Vec<String>,
    pub notes: String,
    /// Shelf keys; currently always `[category]`.
    pub tags: Vec<String>,
}

impl From<ParsedNote> for ParsedNoteView {
    fn from(value: ParsedNote) -> Self {
        Self {
            category: value.category.key().to_string(),
            title: value.title,
            fields: value
                .fields
                .into_iter()
                .map(|(key, value)| FieldEntry { key, value })
                .collect(),
            hash_tags: value.hash_tags,
            notes: value.notes,
            tags: value.tags.iter().map(|shelf| shelf.key().to_string()).collect(),
        }
    }
}

/// Shelf option for pickers and tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfOption {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub aliases: Vec<String>,
}

/// Result of turning a classifier reply into a storable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeResponse {
    /// Whether the reply decoded; `false` means `raw` is the manual fallback.
    pub ok: bool,
    /// Shorthand line to submit through `parse_note`.
    pub raw: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Parses one shorthand line.
///
/// # FFI contract
/// - Sync call, pure, never fails.
#[flutter_rust_bridge::frb(sync)]
pub fn parse_note(raw: String) -> ParsedNoteView {
    parse_note_inner(raw.as_str()).into()
}

/// Returns whether input should go through the URL review flow.
#[flutter_rust_bridge::frb(sync)]
pub fn is_bare_url(text: String) -> bool {
    is_bare_url_inner(text.as_str())
}

/// Lists shelves in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_shelves() -> Vec<ShelfOption> {
    ShelfTable::builtin()
        .shelves()
        .iter()
        .map(|def| ShelfOption {
            key: def.shelf.key().to_string(),
            name: def.name.clone(),
            icon: def.icon.clone(),
            aliases: def.aliases.clone(),
        })
        .collect()
}

/// Resolves a stored record's tags (legacy keys included) to a shelf key.
#[flutter_rust_bridge::frb(sync)]
pub fn shelf_for_tags(tags: Vec<String>) -> String {
    shelf_for_tags_inner(&tags, ShelfTable::builtin())
        .key()
        .to_string()
}

/// Builds the shorthand line for a reviewed URL from the classifier reply.
///
/// On decode failure the URL doubles as the title on the fallback shelf so
/// the link can still be saved.
#[flutter_rust_bridge::frb(sync)]
pub fn compose_from_classification(reply: String, url: String) -> ComposeResponse {
    match UrlClassification::from_model_reply(reply.as_str()) {
        Ok(classification) => ComposeResponse {
            ok: true,
            raw: classification.to_raw_line(url.as_str()),
            message: "ok".to_string(),
        },
        Err(err) => {
            warn!("event=compose_from_classification module=ffi status=error");
            ComposeResponse {
                ok: false,
                raw: UrlClassification::fallback(url.as_str()).to_raw_line(url.as_str()),
                message: err.to_string(),
            }
        }
    }
}
