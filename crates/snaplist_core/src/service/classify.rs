//! Decoding of URL classification replies.
//!
//! # Responsibility
//! - Prepare page metadata (`<head>` section) for the external classifier.
//! - Decode the classifier's JSON reply into [`UrlClassification`].
//! - Convert a reviewed classification into a shorthand line for the parser.
//!
//! # Invariants
//! - Unknown shelf keys in a reply degrade to [`Shelf::Other`].
//! - Decoding never trusts surrounding prose; only the outermost `{...}` is read.
//!
//! The classifier call itself (network + model) lives outside this crate.

use crate::model::note::Fields;
use crate::model::shelf::Shelf;
use crate::service::compose::{compose_raw_line, parse_tag_list};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of characters of page head forwarded to the classifier.
pub const MAX_HEAD_CHARS: usize = 4000;

static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"));
static HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<head[^>]*>(.*?)</head>").expect("valid head regex"));

/// Error for classifier reply decoding.
#[derive(Debug)]
pub enum ClassificationError {
    /// Reply contains no `{...}` object.
    MissingJson,
    /// The extracted object is not a valid classification.
    InvalidJson(serde_json::Error),
}

impl Display for ClassificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJson => write!(f, "no JSON object in classifier reply"),
            Self::InvalidJson(err) => write!(f, "invalid classifier reply: {err}"),
        }
    }
}

impl Error for ClassificationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingJson => None,
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ClassificationError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Shelf guess and metadata for one web page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlClassification {
    /// Shelf key as returned by the classifier; may be unknown.
    #[serde(default)]
    pub shelf: String,
    #[serde(default)]
    pub title: String,
    /// Typically `author` and `site`.
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

impl UrlClassification {
    /// Decodes a classifier reply, tolerating prose or code fences around
    /// the JSON object.
    pub fn from_model_reply(reply: &str) -> Result<Self, ClassificationError> {
        let Some(object) = JSON_OBJECT_RE.find(reply) else {
            warn!("event=classification_decode module=classify status=error reason=missing_json");
            return Err(ClassificationError::MissingJson);
        };

        let decoded: Self = serde_json::from_str(object.as_str()).map_err(|err| {
            warn!(
                "event=classification_decode module=classify status=error reason=invalid_json"
            );
            ClassificationError::from(err)
        })?;

        info!(
            "event=classification_decode module=classify status=ok shelf={} fields={} hashtags={}",
            decoded.resolved_shelf(),
            decoded.fields.len(),
            decoded.hashtags.len()
        );
        Ok(decoded)
    }

    /// Manual-entry fallback used when classification fails: the URL doubles
    /// as the title and the shelf is [`Shelf::Other`].
    pub fn fallback(url: &str) -> Self {
        Self {
            shelf: Shelf::Other.key().to_string(),
            title: url.trim().to_string(),
            ..Self::default()
        }
    }

    /// Shelf to file under; unknown keys degrade to [`Shelf::Other`].
    pub fn resolved_shelf(&self) -> Shelf {
        Shelf::from_key(&self.shelf).unwrap_or(Shelf::Other)
    }

    /// Builds the shorthand line stored for this page.
    ///
    /// A blank title falls back to the URL.
    pub fn to_raw_line(&self, url: &str) -> String {
        let title = match self.title.trim() {
            "" => url.trim(),
            title => title,
        };
        let tags = parse_tag_list(&self.hashtags.join(","));
        compose_raw_line(self.resolved_shelf(), title, &self.fields, &tags, url)
    }
}

/// Returns the inner `<head>` markup of `html`, or the whole document when
/// no head element is present, capped at [`MAX_HEAD_CHARS`] characters.
pub fn head_section(html: &str) -> String {
    let head = HEAD_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str());
    head.chars().take(MAX_HEAD_CHARS).collect()
}
