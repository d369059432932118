//! `key:value` field extraction.
//!
//! # Grammar
//! - `key`: one or more ASCII word characters, not directly preceded by `/`
//!   or `:`, followed by `:`.
//! - `value`: starts with a character that is neither a comma nor whitespace
//!   and runs up to the next comma, the end of the text, or whitespace
//!   followed by another `key:`, whichever comes first.
//!
//! Matching proceeds left to right without overlap; scanning resumes after
//! every match, accepted or not. Rejected candidates (`http`/`https` keys)
//! stay in the text verbatim.

use crate::model::note::Fields;
use crate::parser::collapse_empty_segments;

/// One `key:value` candidate, as char indices into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldMatch {
    start: usize,
    key_end: usize,
    end: usize,
}

/// Outcome of trying one start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Found(FieldMatch),
    /// No field starts before this index.
    Skip(usize),
}

/// Extracts `key:value` fields from comma-joined text.
///
/// Keys are lowercased; a later field with the same key replaces an earlier
/// one. Accepted fields are removed from the text; empty segments left
/// behind are collapsed and dangling commas trimmed, and the remainder is
/// returned as free-form notes. Runs in time linear in the input length.
pub fn extract_fields(text: &str) -> (Fields, String) {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |(offset, _)| *offset);

    let mut fields = Fields::new();
    let mut clean = String::with_capacity(text.len());
    let mut copied_to = 0;
    let mut idx = 0;

    while idx < chars.len() {
        let found = match match_field_at(&chars, idx) {
            Candidate::Found(found) => found,
            Candidate::Skip(next) => {
                idx = next;
                continue;
            }
        };

        let start = byte_at(found.start);
        let key = &text[start..byte_at(found.key_end)];
        let value = text[byte_at(found.key_end + 1)..byte_at(found.end)].trim();

        if !value.is_empty() && !is_url_scheme(key) {
            clean.push_str(&text[copied_to..start]);
            copied_to = byte_at(found.end);
            fields.insert(key.to_lowercase(), value.to_string());
        }
        idx = found.end;
    }

    clean.push_str(&text[copied_to..]);
    let notes = collapse_empty_segments(&clean)
        .trim_matches(|ch: char| ch == ',' || ch.is_whitespace())
        .to_string();
    (fields, notes)
}

fn match_field_at(chars: &[(usize, char)], start: usize) -> Candidate {
    // Every start inside one word run shares its end, so a run that cannot
    // be a key is skipped whole. A run blocked only by a leading `/` or `:`
    // is retried from its second character.
    if start > 0 && matches!(chars[start - 1].1, '/' | ':') {
        return Candidate::Skip(start + 1);
    }

    let key_end = word_run_end(chars, start);
    if key_end == start {
        return Candidate::Skip(start + 1);
    }
    if !char_is(chars, key_end, ':') {
        return Candidate::Skip(key_end);
    }

    let value_start = key_end + 1;
    match chars.get(value_start) {
        Some((_, ch)) if *ch != ',' && !ch.is_whitespace() => {}
        _ => return Candidate::Skip(key_end),
    }

    let mut end = value_start + 1;
    while end < chars.len() && chars[end].1 != ',' {
        let gap_end = whitespace_run_end(chars, end);
        if gap_end == end {
            end += 1;
        } else if key_starts_at(chars, gap_end) {
            break;
        } else {
            end = gap_end;
        }
    }

    Candidate::Found(FieldMatch {
        start,
        key_end,
        end,
    })
}

/// A word run followed by `:`.
fn key_starts_at(chars: &[(usize, char)], at: usize) -> bool {
    let word_end = word_run_end(chars, at);
    word_end > at && char_is(chars, word_end, ':')
}

fn whitespace_run_end(chars: &[(usize, char)], from: usize) -> usize {
    let mut idx = from;
    while idx < chars.len() && chars[idx].1.is_whitespace() {
        idx += 1;
    }
    idx
}

fn word_run_end(chars: &[(usize, char)], from: usize) -> usize {
    let mut idx = from;
    while idx < chars.len() && is_word_char(chars[idx].1) {
        idx += 1;
    }
    idx
}

fn char_is(chars: &[(usize, char)], idx: usize, expected: char) -> bool {
    chars.get(idx).is_some_and(|(_, ch)| *ch == expected)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_url_scheme(key: &str) -> bool {
    key.eq_ignore_ascii_case("http") || key.eq_ignore_ascii_case("https")
}

#[cfg(test)]
mod tests {
    use super::extract_fields;
    use crate::model::note::Fields;

    fn fields_of(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn extracts_comma_separated_fields() {
        let (fields, clean) = extract_fields("author:Herbert, year:1965");
        assert_eq!(fields, fields_of(&[("author", "Herbert"), ("year", "1965")]));
        assert_eq!(clean, "");
    }

    #[test]
    fn value_stops_before_next_space_separated_key() {
        let (fields, clean) = extract_fields("author:Frank Herbert year:1965 great read");
        assert_eq!(
            fields,
            fields_of(&[("author", "Frank Herbert"), ("year", "1965 great read")])
        );
        assert_eq!(clean, "");
    }

    #[test]
    fn keys_are_lowercased_and_later_duplicates_win() {
        let (fields, _) = extract_fields("Rating:4, rating:5");
        assert_eq!(fields, fields_of(&[("rating", "5")]));
    }

    #[test]
    fn url_scheme_keys_are_left_in_text() {
        let (fields, clean) = extract_fields("source:blog, https://example.com/a");
        assert_eq!(fields, fields_of(&[("source", "blog")]));
        assert_eq!(clean, "https://example.com/a");

        let (fields, clean) = extract_fields("HTTP:thing");
        assert!(fields.is_empty());
        assert_eq!(clean, "HTTP:thing");
    }

    #[test]
    fn colon_followed_by_space_or_comma_is_not_a_field() {
        let (fields, clean) = extract_fields("note: remember this, when:, later");
        assert!(fields.is_empty());
        assert_eq!(clean, "note: remember this, when:, later");
    }

    #[test]
    fn key_directly_after_slash_or_colon_is_skipped() {
        let (fields, clean) = extract_fields("path/x:1");
        assert!(fields.is_empty());
        assert_eq!(clean, "path/x:1");
    }

    #[test]
    fn key_blocked_by_leading_slash_is_retried_inside_the_run() {
        let (fields, clean) = extract_fields("/ab:1");
        assert_eq!(fields, fields_of(&[("b", "1")]));
        assert_eq!(clean, "/a");
    }

    #[test]
    fn long_word_run_without_colon_is_kept_as_notes() {
        let text = "a".repeat(100_000);
        let (fields, clean) = extract_fields(&text);
        assert!(fields.is_empty());
        assert_eq!(clean, text);
    }

    #[test]
    fn long_whitespace_gap_stays_inside_value() {
        let gap = " ".repeat(100_000);
        let (fields, clean) = extract_fields(&format!("k:x{gap}y"));
        assert_eq!(fields.get("k"), Some(&format!("x{gap}y")));
        assert_eq!(clean, "");

        let (fields, _) = extract_fields(&format!("k:x{gap}next:y"));
        assert_eq!(fields, fields_of(&[("k", "x"), ("next", "y")]));
    }

    #[test]
    fn free_text_remains_as_notes() {
        let (fields, clean) = extract_fields("loved it, where:Lisbon, go back");
        assert_eq!(fields, fields_of(&[("where", "Lisbon")]));
        assert_eq!(clean, "loved it, go back");
    }
}
