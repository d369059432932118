//! Inline autocomplete for the shorthand input line.
//!
//! # Invariants
//! - Suggestions are strict extensions: the returned line always starts with
//!   the full input and is longer than it.
//! - Candidates are matched in sorted order; the first hit wins.
//! - All dictionary entries are lowercase.

use crate::model::note::NoteRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

static FIELD_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9A-Za-z_]+):([^,]*)$").expect("valid field value regex"));
static FIELD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([0-9A-Za-z_]+)$").expect("valid field name regex"));
static HASHTAG_PARTIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9A-Za-z_]*)$").expect("valid hashtag partial regex"));

const MIN_FIELD_NAME_PARTIAL: usize = 2;

/// Dictionary of field names, field values and hashtags seen in stored notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionIndex {
    field_names: BTreeSet<String>,
    field_values: BTreeMap<String, BTreeSet<String>>,
    hash_tags: BTreeSet<String>,
}

impl SuggestionIndex {
    /// Builds the dictionary from existing notes.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a NoteRecord>) -> Self {
        let mut index = Self::default();
        for note in notes {
            for (key, value) in &note.fields {
                let key = key.to_lowercase();
                index
                    .field_values
                    .entry(key.clone())
                    .or_default()
                    .insert(value.to_lowercase());
                index.field_names.insert(key);
            }
            index
                .hash_tags
                .extend(note.hash_tags.iter().map(|tag| tag.to_lowercase()));
        }
        index
    }

    /// Known field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_names.iter().map(String::as_str)
    }

    /// Known hashtags, sorted.
    pub fn hash_tags(&self) -> impl Iterator<Item = &str> {
        self.hash_tags.iter().map(String::as_str)
    }

    /// Proposes a completed input line for the text before `cursor`.
    ///
    /// `cursor` is a byte offset; `None` or `0` means end of input. Checks,
    /// in order: a trailing `key:partial` value, a trailing `, partial`
    /// field name (at least two characters, completion appends `:`), and a
    /// trailing `#partial` hashtag.
    pub fn suggest(&self, input: &str, cursor: Option<usize>) -> Option<String> {
        if input.is_empty() {
            return None;
        }
        let before = &input[..cursor_offset(input, cursor)];

        if let Some(caps) = FIELD_VALUE_RE.captures(before) {
            let key = caps[1].to_lowercase();
            let partial = caps[2].to_lowercase();
            if !partial.is_empty() {
                if let Some(done) = self
                    .field_values
                    .get(&key)
                    .and_then(|values| complete(values, &partial))
                {
                    return Some(format!("{input}{}", &done[partial.len()..]));
                }
            }
        }

        if let Some(caps) = FIELD_NAME_RE.captures(before) {
            let partial = caps[1].to_lowercase();
            if partial.len() >= MIN_FIELD_NAME_PARTIAL {
                if let Some(done) = complete(&self.field_names, &partial) {
                    return Some(format!("{input}{}:", &done[partial.len()..]));
                }
            }
        }

        if let Some(caps) = HASHTAG_PARTIAL_RE.captures(before) {
            let partial = caps[1].to_lowercase();
            if !partial.is_empty() {
                if let Some(done) = complete(&self.hash_tags, &partial) {
                    return Some(format!("{input}{}", &done[partial.len()..]));
                }
            }
        }

        None
    }
}

fn complete<'a>(candidates: &'a BTreeSet<String>, partial: &str) -> Option<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .find(|candidate| candidate.starts_with(partial) && *candidate != partial)
}

fn cursor_offset(input: &str, cursor: Option<usize>) -> usize {
    match cursor {
        Some(offset) if offset > 0 => {
            let mut offset = offset.min(input.len());
            while !input.is_char_boundary(offset) {
                offset -= 1;
            }
            offset
        }
        _ => input.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::{cursor_offset, SuggestionIndex};
    use crate::model::note::NoteRecord;
    use crate::parser::parse_note;

    fn index(lines: &[&str]) -> SuggestionIndex {
        let notes: Vec<NoteRecord> = lines
            .iter()
            .map(|raw| NoteRecord::from_parsed("u1", *raw, parse_note(raw), 1))
            .collect();
        SuggestionIndex::from_notes(&notes)
    }

    #[test]
    fn completes_field_values_for_known_key() {
        let idx = index(&["book: Dune, author:Herbert", "book: Emma, author:Austen"]);
        assert_eq!(
            idx.suggest("book: Dune Messiah, author:He", None).as_deref(),
            Some("book: Dune Messiah, author:Herbert")
        );
        assert_eq!(idx.suggest("book: X, author:herbert", None), None);
    }

    #[test]
    fn completes_field_names_after_comma() {
        let idx = index(&["book: Dune, author:Herbert, rating:5"]);
        assert_eq!(
            idx.suggest("book: Emma, au", None).as_deref(),
            Some("book: Emma, author:")
        );
        assert_eq!(idx.suggest("book: Emma, a", None), None);
    }

    #[test]
    fn completes_hashtags() {
        let idx = index(&["read: x #scifi #classic"]);
        assert_eq!(idx.suggest("read: y #sc", None).as_deref(), Some("read: y #scifi"));
        assert_eq!(idx.suggest("read: y #", None), None);
    }

    #[test]
    fn cursor_limits_the_inspected_prefix() {
        let idx = index(&["read: x #scifi"]);
        assert_eq!(idx.suggest("#sc later", Some(3)).as_deref(), Some("#sc laterifi"));
        assert_eq!(cursor_offset("héllo", Some(2)), 1);
        assert_eq!(cursor_offset("abc", Some(0)), 3);
    }
}
