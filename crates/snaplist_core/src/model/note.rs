//! Parsed note value and the persisted note record shape.
//!
//! # Responsibility
//! - Define [`ParsedNote`], the immutable output of the shorthand parser.
//! - Define [`NoteRecord`], the shape the external store persists, and the
//!   edit path that keeps its invariants.
//!
//! # Invariants
//! - Field keys are lowercase; field values are trimmed and non-empty.
//! - Hashtags are lowercase and never carry the leading `#`.
//! - `ParsedNote::tags` holds exactly the resolved shelf.

use crate::legacy::shelf_for_tags;
use crate::model::shelf::{Shelf, ShelfTable};
use crate::service::compose::parse_tag_list;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Field map keyed by lowercase field name.
pub type Fields = BTreeMap<String, String>;

/// Stable identifier assigned to a stored note.
pub type NoteId = Uuid;

/// Structured result of parsing one shorthand line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNote {
    pub category: Shelf,
    pub title: String,
    pub fields: Fields,
    pub hash_tags: Vec<String>,
    pub notes: String,
    /// Always `[category]`.
    pub tags: Vec<Shelf>,
}

impl ParsedNote {
    /// Value produced for input that carries no content at all.
    pub fn empty() -> Self {
        Self {
            category: Shelf::Other,
            title: String::new(),
            fields: Fields::new(),
            hash_tags: Vec::new(),
            notes: String::new(),
            tags: vec![Shelf::Other],
        }
    }

    /// URL captured by the parser, if any.
    pub fn url(&self) -> Option<&str> {
        self.fields.get("url").map(String::as_str)
    }
}

/// Persisted note shape, as written by the external store.
///
/// `tags` is kept as strings because older records carry legacy category
/// keys; use [`NoteRecord::shelf`] to read the effective shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: NoteId,
    pub user_id: String,
    pub raw: String,
    pub title: String,
    pub tags: Vec<String>,
    pub hash_tags: Vec<String>,
    pub fields: Fields,
    pub notes: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl NoteRecord {
    /// Builds a new record from parser output with a generated id.
    pub fn from_parsed(
        user_id: impl Into<String>,
        raw: impl Into<String>,
        parsed: ParsedNote,
        timestamp: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            raw: raw.into(),
            title: parsed.title,
            tags: parsed.tags.iter().map(|shelf| shelf.key().to_string()).collect(),
            hash_tags: parsed.hash_tags,
            fields: parsed.fields,
            notes: parsed.notes,
            timestamp,
        }
    }

    /// Effective shelf of this record, remapping legacy category keys.
    pub fn shelf(&self) -> Shelf {
        self.shelf_in(ShelfTable::builtin())
    }

    /// Same as [`NoteRecord::shelf`] against a custom alias table.
    pub fn shelf_in(&self, table: &ShelfTable) -> Shelf {
        shelf_for_tags(&self.tags, table)
    }

    /// Applies a user edit with full replacement semantics.
    ///
    /// # Errors
    /// - [`NoteEditError::InvalidFieldKey`] when a field key is blank. The
    ///   record is left untouched in that case.
    pub fn apply_edit(&mut self, edit: NoteEdit) -> Result<(), NoteEditError> {
        let mut fields = Fields::new();
        for (raw_key, value) in edit.fields {
            let key = raw_key.trim().to_lowercase();
            if key.is_empty() {
                return Err(NoteEditError::InvalidFieldKey(raw_key));
            }
            let value = value.trim();
            if !value.is_empty() {
                fields.insert(key, value.to_string());
            }
        }

        self.title = edit.title.trim().to_string();
        self.fields = fields;
        self.hash_tags = parse_tag_list(&edit.hash_tags);
        self.notes = edit.notes.trim().to_string();
        Ok(())
    }
}

/// User-facing edit payload for an existing note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteEdit {
    pub title: String,
    /// Field pairs as typed; keys are normalized on apply.
    pub fields: Vec<(String, String)>,
    /// Comma-separated hashtag list, `#` optional.
    pub hash_tags: String,
    pub notes: String,
}

/// Error for note edit validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEditError {
    /// A field key is blank after trimming.
    InvalidFieldKey(String),
}

impl Display for NoteEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFieldKey(key) => write!(f, "invalid field key: `{key}`"),
        }
    }
}

impl Error for NoteEditError {}

#[cfg(test)]
mod tests {
    use super::{Fields, NoteEdit, NoteEditError, NoteRecord, ParsedNote};
    use crate::model::shelf::Shelf;

    fn sample_record() -> NoteRecord {
        let mut parsed = ParsedNote::empty();
        parsed.category = Shelf::Read;
        parsed.tags = vec![Shelf::Read];
        parsed.title = "Dune".to_string();
        NoteRecord::from_parsed("user-1", "read: Dune", parsed, 1_700_000_000_000)
    }

    #[test]
    fn from_parsed_stores_shelf_keys_as_tags() {
        let record = sample_record();
        assert!(!record.id.is_nil());
        assert_eq!(record.tags, vec!["read".to_string()]);
        assert_eq!(record.shelf(), Shelf::Read);
    }

    #[test]
    fn apply_edit_normalizes_fields_and_tags() {
        let mut record = sample_record();
        record
            .apply_edit(NoteEdit {
                title: " Dune Messiah ".to_string(),
                fields: vec![
                    ("Author".to_string(), " Herbert ".to_string()),
                    ("year".to_string(), "  ".to_string()),
                ],
                hash_tags: "#SciFi, classic, ".to_string(),
                notes: "sequel ".to_string(),
            })
            .unwrap();

        let mut expected = Fields::new();
        expected.insert("author".to_string(), "Herbert".to_string());
        assert_eq!(record.title, "Dune Messiah");
        assert_eq!(record.fields, expected);
        assert_eq!(record.hash_tags, vec!["scifi", "classic"]);
        assert_eq!(record.notes, "sequel");
    }

    #[test]
    fn apply_edit_rejects_blank_field_key_without_mutation() {
        let mut record = sample_record();
        let err = record
            .apply_edit(NoteEdit {
                title: "changed".to_string(),
                fields: vec![("  ".to_string(), "x".to_string())],
                ..NoteEdit::default()
            })
            .unwrap_err();
        assert!(matches!(err, NoteEditError::InvalidFieldKey(_)));
        assert_eq!(record.title, "Dune");
    }
}
