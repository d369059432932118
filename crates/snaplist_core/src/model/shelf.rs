//! Shelf enumeration and the alias table used for prefix resolution.
//!
//! # Responsibility
//! - Define the closed set of shelves a note can be filed under.
//! - Own the alias table (display metadata + lowercase aliases per shelf).
//! - Load custom alias tables from JSON configuration once at startup.
//!
//! # Invariants
//! - Every table contains exactly one definition per [`Shelf`], in
//!   [`Shelf::ALL`] order.
//! - Aliases are trimmed, lowercase, colon-free and unique across shelves.
//! - [`Shelf::Other`] never carries aliases; it is reachable only as fallback.
//! - A constructed table is never mutated.

use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

static BUILTIN_TABLE: Lazy<ShelfTable> = Lazy::new(|| {
    ShelfTable::from_defs(builtin_defs()).expect("built-in shelf table is valid")
});

/// Top-level category a note is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shelf {
    Read,
    Watch,
    Eat,
    Do,
    Buy,
    /// Universal fallback when no alias matches.
    Other,
}

impl Shelf {
    /// All shelves in display order.
    pub const ALL: [Shelf; 6] = [
        Shelf::Read,
        Shelf::Watch,
        Shelf::Eat,
        Shelf::Do,
        Shelf::Buy,
        Shelf::Other,
    ];

    /// Stable lowercase key used on the wire and in persisted `tags`.
    pub fn key(self) -> &'static str {
        match self {
            Shelf::Read => "read",
            Shelf::Watch => "watch",
            Shelf::Eat => "eat",
            Shelf::Do => "do",
            Shelf::Buy => "buy",
            Shelf::Other => "other",
        }
    }

    /// Parses a shelf key. Matching is case-insensitive and ignores
    /// surrounding whitespace; aliases are not considered.
    pub fn from_key(value: &str) -> Option<Shelf> {
        let normalized = value.trim().to_lowercase();
        Shelf::ALL
            .into_iter()
            .find(|shelf| shelf.key() == normalized)
    }

    /// Built-in display name.
    pub fn default_name(self) -> &'static str {
        match self {
            Shelf::Read => "Read",
            Shelf::Watch => "Watch",
            Shelf::Eat => "Eat",
            Shelf::Do => "Do",
            Shelf::Buy => "Buy",
            Shelf::Other => "Other",
        }
    }

    /// Built-in display icon.
    pub fn default_icon(self) -> &'static str {
        match self {
            Shelf::Read => "📖",
            Shelf::Watch => "🎬",
            Shelf::Eat => "🍽️",
            Shelf::Do => "🎯",
            Shelf::Buy => "🛍️",
            Shelf::Other => "📝",
        }
    }
}

impl Display for Shelf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Display metadata and aliases for one shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShelfDef {
    pub shelf: Shelf,
    pub name: String,
    pub icon: String,
    /// Normalized lowercase aliases, in declaration order.
    pub aliases: Vec<String>,
}

impl ShelfDef {
    /// Creates a definition with built-in name/icon and the given aliases.
    pub fn new<I, S>(shelf: Shelf, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            shelf,
            name: shelf.default_name().to_string(),
            icon: shelf.default_icon().to_string(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration error raised while building a [`ShelfTable`].
#[derive(Debug)]
pub enum ShelfConfigError {
    /// Config file cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config text is not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// The same shelf is defined twice.
    DuplicateShelf(Shelf),
    /// An alias is blank after trimming.
    EmptyAlias(Shelf),
    /// An alias contains `:` and could never match a prefix.
    InvalidAlias { shelf: Shelf, alias: String },
    /// Aliases were declared for the fallback shelf.
    AliasOnFallback(String),
    /// One alias is claimed by two shelves.
    DuplicateAlias {
        alias: String,
        first: Shelf,
        second: Shelf,
    },
}

impl Display for ShelfConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read shelf config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid shelf config: {err}"),
            Self::DuplicateShelf(shelf) => write!(f, "shelf `{shelf}` is defined more than once"),
            Self::EmptyAlias(shelf) => write!(f, "shelf `{shelf}` has a blank alias"),
            Self::InvalidAlias { shelf, alias } => {
                write!(f, "alias `{alias}` of shelf `{shelf}` must not contain `:`")
            }
            Self::AliasOnFallback(alias) => {
                write!(f, "fallback shelf `other` cannot have aliases, got `{alias}`")
            }
            Self::DuplicateAlias {
                alias,
                first,
                second,
            } => write!(
                f,
                "alias `{alias}` is claimed by both `{first}` and `{second}`"
            ),
        }
    }
}

impl Error for ShelfConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ShelfConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShelfConfigFile {
    shelves: Vec<ShelfConfigEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShelfConfigEntry {
    shelf: Shelf,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Immutable alias table consumed by the category resolver and by hosts that
/// enumerate shelf options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfTable {
    defs: Vec<ShelfDef>,
    alias_index: HashMap<String, Shelf>,
}

impl ShelfTable {
    /// Returns the process-wide built-in table.
    pub fn builtin() -> &'static ShelfTable {
        &BUILTIN_TABLE
    }

    /// Builds and validates a table from shelf definitions.
    ///
    /// Shelves missing from `defs` keep their built-in name and icon with no
    /// aliases. Aliases are normalized to trimmed lowercase; repeats within
    /// one shelf collapse.
    ///
    /// # Errors
    /// - Any violation listed on [`ShelfConfigError`].
    pub fn from_defs(defs: Vec<ShelfDef>) -> Result<Self, ShelfConfigError> {
        let mut slots: Vec<Option<ShelfDef>> = vec![None; Shelf::ALL.len()];
        let mut alias_index = HashMap::<String, Shelf>::new();

        for def in defs {
            let slot = shelf_slot(def.shelf);
            if slots[slot].is_some() {
                return Err(ShelfConfigError::DuplicateShelf(def.shelf));
            }

            let mut seen = BTreeSet::<String>::new();
            let mut aliases = Vec::with_capacity(def.aliases.len());
            for raw in &def.aliases {
                let alias = raw.trim().to_lowercase();
                if alias.is_empty() {
                    return Err(ShelfConfigError::EmptyAlias(def.shelf));
                }
                if alias.contains(':') {
                    return Err(ShelfConfigError::InvalidAlias {
                        shelf: def.shelf,
                        alias,
                    });
                }
                if def.shelf == Shelf::Other {
                    return Err(ShelfConfigError::AliasOnFallback(alias));
                }
                if !seen.insert(alias.clone()) {
                    continue;
                }
                if let Some(first) = alias_index.get(&alias) {
                    return Err(ShelfConfigError::DuplicateAlias {
                        alias,
                        first: *first,
                        second: def.shelf,
                    });
                }
                alias_index.insert(alias.clone(), def.shelf);
                aliases.push(alias);
            }

            slots[slot] = Some(ShelfDef { aliases, ..def });
        }

        let defs = Shelf::ALL
            .into_iter()
            .zip(slots)
            .map(|(shelf, slot)| slot.unwrap_or_else(|| ShelfDef::new(shelf, Vec::<String>::new())))
            .collect();

        Ok(Self { defs, alias_index })
    }

    /// Parses a JSON alias configuration.
    ///
    /// Shape: `{"shelves": [{"shelf": "read", "name": "Read", "icon": "📖",
    /// "aliases": ["book"]}]}`; `name`, `icon` and `aliases` are optional.
    pub fn from_json(json: &str) -> Result<Self, ShelfConfigError> {
        let file: ShelfConfigFile = serde_json::from_str(json)?;
        let defs = file
            .shelves
            .into_iter()
            .map(|entry| ShelfDef {
                shelf: entry.shelf,
                name: entry
                    .name
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| entry.shelf.default_name().to_string()),
                icon: entry
                    .icon
                    .filter(|icon| !icon.trim().is_empty())
                    .unwrap_or_else(|| entry.shelf.default_icon().to_string()),
                aliases: entry.aliases,
            })
            .collect();

        let table = Self::from_defs(defs)?;
        info!(
            "event=shelf_config_loaded module=config status=ok shelves={} aliases={}",
            table.defs.len(),
            table.alias_index.len()
        );
        Ok(table)
    }

    /// Reads and parses a JSON alias configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ShelfConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ShelfConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// All shelf definitions in [`Shelf::ALL`] order.
    pub fn shelves(&self) -> &[ShelfDef] {
        &self.defs
    }

    /// Definition for one shelf.
    pub fn get(&self, shelf: Shelf) -> &ShelfDef {
        &self.defs[shelf_slot(shelf)]
    }

    /// Exact alias lookup. `candidate` is expected trimmed and lowercase.
    pub fn lookup_alias(&self, candidate: &str) -> Option<Shelf> {
        self.alias_index.get(candidate).copied()
    }
}

impl Default for ShelfTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn shelf_slot(shelf: Shelf) -> usize {
    match shelf {
        Shelf::Read => 0,
        Shelf::Watch => 1,
        Shelf::Eat => 2,
        Shelf::Do => 3,
        Shelf::Buy => 4,
        Shelf::Other => 5,
    }
}

fn builtin_defs() -> Vec<ShelfDef> {
    vec![
        ShelfDef::new(
            Shelf::Read,
            [
                "read", "reading", "book", "books", "article", "articles", "blog", "post",
                "paper", "docs",
            ],
        ),
        ShelfDef::new(
            Shelf::Watch,
            [
                "watch", "movie", "movies", "film", "films", "show", "shows", "tv", "series",
                "video", "videos",
            ],
        ),
        ShelfDef::new(
            Shelf::Eat,
            [
                "eat",
                "food",
                "restaurant",
                "restaurants",
                "cafe",
                "bar",
                "drink",
                "drinks",
                "recipe",
                "beer",
                "wine",
                "cocktail",
            ],
        ),
        ShelfDef::new(
            Shelf::Do,
            [
                "do",
                "activity",
                "activities",
                "event",
                "events",
                "hike",
                "concert",
                "museum",
                "theater",
                "visit",
            ],
        ),
        ShelfDef::new(
            Shelf::Buy,
            ["buy", "shop", "shopping", "product", "products", "gift", "gear"],
        ),
        ShelfDef::new(Shelf::Other, Vec::<String>::new()),
    ]
}
