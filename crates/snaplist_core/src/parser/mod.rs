//! Shorthand note parser.
//!
//! # Responsibility
//! - Turn one typed line (`shelf: Title, key:value, #tag, notes`) into a
//!   [`ParsedNote`].
//! - Keep every stage a pure function over strings.
//!
//! # Invariants
//! - Parsing is total: every input, including `""`, yields a well-formed note.
//! - Stage order is fixed: shelf prefix, URL, hashtags, comma split, fields.
//! - The alias table is borrowed, never mutated.

use crate::model::note::ParsedNote;
use crate::model::shelf::ShelfTable;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

mod category;
mod fields;
mod hashtag;
mod url;

pub use category::resolve_category;
pub use fields::extract_fields;
pub use hashtag::extract_hashtags;
pub use url::{extract_url, is_bare_url};

static EMPTY_SEGMENTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(?:\s*,)+").expect("valid empty segment regex"));
static TRAILING_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*$").expect("valid trailing separator regex"));

/// Parser bound to one alias table.
#[derive(Debug, Clone, Copy)]
pub struct NoteParser<'a> {
    shelves: &'a ShelfTable,
}

impl<'a> NoteParser<'a> {
    /// Creates a parser resolving prefixes against `shelves`.
    pub fn new(shelves: &'a ShelfTable) -> Self {
        Self { shelves }
    }

    /// Parses one raw line.
    pub fn parse(&self, raw: &str) -> ParsedNote {
        let (category, remainder) = resolve_category(raw, self.shelves);
        let (url, text) = extract_url(&remainder);
        let (hash_tags, text) = extract_hashtags(&text);

        let parts: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        let title = parts.first().copied().unwrap_or_default().to_string();
        let rest = parts.get(1..).unwrap_or_default().join(", ");

        let (mut fields, notes) = extract_fields(&rest);
        if let Some(url) = url {
            fields.insert("url".to_string(), url);
        }
        let notes = TRAILING_SEPARATOR_RE.replace(&notes, "").trim().to_string();

        debug!(
            "event=note_parsed module=parser status=ok shelf={} fields={} hashtags={} has_url={} has_notes={}",
            category,
            fields.len(),
            hash_tags.len(),
            fields.contains_key("url"),
            !notes.is_empty()
        );

        ParsedNote {
            category,
            title,
            fields,
            hash_tags,
            notes,
            tags: vec![category],
        }
    }
}

impl Default for NoteParser<'static> {
    fn default() -> Self {
        Self::new(ShelfTable::builtin())
    }
}

/// Parses one raw line against the built-in alias table.
pub fn parse_note(raw: &str) -> ParsedNote {
    NoteParser::default().parse(raw)
}

/// Collapses runs of commas separated only by whitespace into one comma.
pub(crate) fn collapse_empty_segments(text: &str) -> Cow<'_, str> {
    EMPTY_SEGMENTS_RE.replace_all(text, ",")
}
