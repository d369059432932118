//! Shelf prefix resolution.

use crate::model::shelf::{Shelf, ShelfTable};

/// Splits a `word:` shelf prefix off `raw`.
///
/// Only the text before the first `:` is considered, and it must equal an
/// alias exactly (case-insensitive, trimmed). When there is no colon or the
/// prefix is not an alias, the shelf is [`Shelf::Other`] and the whole
/// trimmed input is returned, colon included.
pub fn resolve_category(raw: &str, table: &ShelfTable) -> (Shelf, String) {
    let Some((prefix, rest)) = raw.split_once(':') else {
        return (Shelf::Other, raw.trim().to_string());
    };

    let candidate = prefix.trim().to_lowercase();
    match table.lookup_alias(&candidate) {
        Some(shelf) => (shelf, rest.trim().to_string()),
        None => (Shelf::Other, raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_category;
    use crate::model::shelf::{Shelf, ShelfDef, ShelfTable};

    fn resolve(raw: &str) -> (Shelf, String) {
        resolve_category(raw, ShelfTable::builtin())
    }

    #[test]
    fn matching_prefix_selects_shelf() {
        assert_eq!(resolve("watch: Dune"), (Shelf::Watch, "Dune".to_string()));
        assert_eq!(resolve("  Movie :Dune  "), (Shelf::Watch, "Dune".to_string()));
    }

    #[test]
    fn missing_prefix_falls_back_to_other() {
        assert_eq!(resolve("Dune"), (Shelf::Other, "Dune".to_string()));
        assert_eq!(resolve("   "), (Shelf::Other, String::new()));
    }

    #[test]
    fn unknown_prefix_keeps_whole_text() {
        assert_eq!(
            resolve("xyz: something"),
            (Shelf::Other, "xyz: something".to_string())
        );
        assert_eq!(resolve("other: misc"), (Shelf::Other, "other: misc".to_string()));
    }

    #[test]
    fn url_scheme_is_not_a_prefix() {
        assert_eq!(
            resolve(" https://example.com/post "),
            (Shelf::Other, "https://example.com/post".to_string())
        );
    }

    #[test]
    fn alias_must_match_exactly() {
        assert_eq!(resolve("books and more: x").0, Shelf::Other);
        assert_eq!(resolve("boo: x").0, Shelf::Other);
    }

    #[test]
    fn injected_table_drives_resolution() {
        let table = ShelfTable::from_defs(vec![ShelfDef::new(Shelf::Buy, ["wishlist"])]).unwrap();
        assert_eq!(
            resolve_category("wishlist: kayak", &table),
            (Shelf::Buy, "kayak".to_string())
        );
        assert_eq!(resolve_category("buy: kayak", &table).0, Shelf::Other);
    }
}
