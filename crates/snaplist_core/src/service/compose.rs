//! Builds shorthand lines from structured input.
//!
//! Reviewed URL classifications are stored by composing a shorthand line and
//! sending it through the regular parser, so the stored `raw` text and the
//! parsed fields always agree.

use crate::model::note::Fields;
use crate::model::shelf::{Shelf, ShelfTable};
use crate::parser::resolve_category;

/// Composes `"<shelf>: <title>, k:v, ... #tag ... <url>"`.
///
/// Blank field values and blank tags are skipped; a leading `#` on a tag is
/// not doubled. Field keys are lowercased and every character outside
/// `[0-9A-Za-z_]` becomes `_`, so `published date` is written as
/// `published_date`. Empty pieces are dropped from the final join.
///
/// The fallback shelf has no alias, so [`Shelf::Other`] lines carry no
/// prefix. When such a title itself starts with an alias prefix
/// (`Book: A Memoir`), the URL is written first so the line still resolves
/// to [`Shelf::Other`]; without a URL the line falls back to `other: <title>`.
///
/// Commas separate segments in the parser, so a title or field value that
/// contains `,` does not survive a compose/parse round trip unchanged.
pub fn compose_raw_line(
    shelf: Shelf,
    title: &str,
    fields: &Fields,
    hash_tags: &[String],
    url: &str,
) -> String {
    let title = title.trim();
    let url = url.trim();

    match shelf {
        Shelf::Other => {
            let body = compose_body(title, fields, hash_tags);
            let plain = join_pieces([body.as_str(), url]);
            if !reads_as_shelf(&plain) {
                return plain;
            }
            let url_first = join_pieces([url, body.as_str()]);
            if !url.is_empty() && !reads_as_shelf(&url_first) {
                return url_first;
            }
            let prefixed = format!("{}: {body}", Shelf::Other.key());
            join_pieces([prefixed.as_str(), url])
        }
        shelf => {
            let head = format!("{}: {title}", shelf.key());
            let body = compose_body(&head, fields, hash_tags);
            join_pieces([body.as_str(), url])
        }
    }
}

/// `"<head>, k:v, ... #tag ..."`.
fn compose_body(head: &str, fields: &Fields, hash_tags: &[String]) -> String {
    let mut parts = vec![head.to_string()];
    for (key, value) in fields {
        let key = field_key(key);
        let value = value.trim();
        if !key.is_empty() && !value.is_empty() {
            parts.push(format!("{key}:{value}"));
        }
    }

    let tag_str = hash_tags
        .iter()
        .map(|tag| {
            let tag = tag.trim();
            tag.strip_prefix('#').unwrap_or(tag)
        })
        .filter(|tag| !tag.is_empty())
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ");

    join_pieces([parts.join(", ").as_str(), tag_str.as_str()])
}

fn field_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn reads_as_shelf(line: &str) -> bool {
    resolve_category(line, ShelfTable::builtin()).0 != Shelf::Other
}

fn join_pieces<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a comma-separated tag list as typed in edit forms.
///
/// Each entry is trimmed, loses one leading `#`, and is lowercased; empty
/// entries are dropped. Order and duplicates are preserved.
pub fn parse_tag_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|tag| {
            let tag = tag.trim();
            tag.strip_prefix('#').unwrap_or(tag).to_lowercase()
        })
        .filter(|tag| !tag.is_empty())
        .collect()
}
