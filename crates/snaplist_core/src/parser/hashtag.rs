//! Hashtag extraction.

use once_cell::sync::Lazy;
use regex::Regex;

// ASCII word characters only; stored notes were written against that class.
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([0-9A-Za-z_]+)").expect("valid hashtag regex"));

/// Extracts `#word` tokens in source order, lowercased and without `#`.
///
/// Duplicates are kept. Every matched token is removed from the returned
/// text, which is trimmed.
pub fn extract_hashtags(text: &str) -> (Vec<String>, String) {
    let hash_tags = HASHTAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|tag| tag.as_str().to_lowercase())
        .collect();
    let clean = HASHTAG_RE.replace_all(text, "").trim().to_string();
    (hash_tags, clean)
}

#[cfg(test)]
mod tests {
    use super::extract_hashtags;

    #[test]
    fn keeps_duplicates_in_order() {
        let (tags, clean) = extract_hashtags("#a #a #b");
        assert_eq!(tags, vec!["a", "a", "b"]);
        assert_eq!(clean, "");
    }

    #[test]
    fn lowercases_and_removes_tokens() {
        let (tags, clean) = extract_hashtags("Dune #SciFi, classic #Must_Read2");
        assert_eq!(tags, vec!["scifi", "must_read2"]);
        assert_eq!(clean, "Dune , classic");
    }

    #[test]
    fn lone_hash_is_not_a_tag() {
        let (tags, clean) = extract_hashtags("issue # 4, #-x");
        assert!(tags.is_empty());
        assert_eq!(clean, "issue # 4, #-x");
    }

    #[test]
    fn tag_stops_at_first_non_word_character() {
        let (tags, clean) = extract_hashtags("#rock-n-roll");
        assert_eq!(tags, vec!["rock"]);
        assert_eq!(clean, "-n-roll");
    }
}
