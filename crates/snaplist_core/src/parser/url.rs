//! URL extraction and bare-URL detection.
//!
//! # Invariants
//! - At most one URL is extracted; the first occurrence wins.
//! - A URL token never contains whitespace or commas.
//! - Trailing sentence punctuation (`.`, `,`, `;`, `)`) is not part of the URL.

use crate::parser::collapse_empty_segments;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:https?)://[^\s,]+").expect("valid url regex"));
static BARE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:https?)://[^\s,]+$").expect("valid bare url regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ')'];

/// Extracts the first HTTP(S) URL from `text`.
///
/// Returns the URL without trailing punctuation and the text with the whole
/// matched token removed, doubled commas collapsed, and ends trimmed. When no
/// URL is present, returns `None` and `text` unchanged.
pub fn extract_url(text: &str) -> (Option<String>, String) {
    let Some(token) = URL_TOKEN_RE.find(text) else {
        return (None, text.to_string());
    };

    let url = token.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string();

    let mut without = String::with_capacity(text.len());
    without.push_str(&text[..token.start()]);
    without.push_str(&text[token.end()..]);
    let collapsed = collapse_empty_segments(&without);

    (Some(url), collapsed.trim().to_string())
}

/// Returns whether the trimmed input is exactly one HTTP(S) URL token.
///
/// Hosts use this to route pasted links through metadata classification
/// instead of the shorthand parser.
pub fn is_bare_url(text: &str) -> bool {
    BARE_URL_RE.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::{extract_url, is_bare_url};

    #[test]
    fn strips_trailing_sentence_punctuation() {
        let (url, clean) = extract_url("see https://x.com/a.");
        assert_eq!(url.as_deref(), Some("https://x.com/a"));
        assert_eq!(clean, "see");
    }

    #[test]
    fn strips_closing_paren_and_semicolon_runs() {
        let (url, clean) = extract_url("(via https://x.com/a);");
        assert_eq!(url.as_deref(), Some("https://x.com/a"));
        assert_eq!(clean, "(via");
    }

    #[test]
    fn first_url_wins() {
        let (url, clean) = extract_url("a http://one.test b https://two.test");
        assert_eq!(url.as_deref(), Some("http://one.test"));
        assert_eq!(clean, "a  b https://two.test");
    }

    #[test]
    fn removing_url_collapses_doubled_commas() {
        let (url, clean) = extract_url("Dune, https://example.com/dune, author:Herbert");
        assert_eq!(url.as_deref(), Some("https://example.com/dune"));
        assert_eq!(clean, "Dune, author:Herbert");
    }

    #[test]
    fn text_without_url_is_returned_unchanged() {
        let (url, clean) = extract_url("  no link here ");
        assert_eq!(url, None);
        assert_eq!(clean, "  no link here ");
    }

    #[test]
    fn bare_url_detection() {
        assert!(is_bare_url("  https://example.com/post?id=1 "));
        assert!(is_bare_url("HTTP://EXAMPLE.COM"));
        assert!(!is_bare_url("read: https://example.com"));
        assert!(!is_bare_url("https://example.com #tech"));
        assert!(!is_bare_url("https://a.com,https://b.com"));
        assert!(!is_bare_url("ftp://example.com"));
        assert!(!is_bare_url(""));
    }
}
