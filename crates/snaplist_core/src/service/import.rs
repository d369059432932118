//! Import of notes exported by the previous storage backend.
//!
//! # Invariants
//! - Imported records keep their stored `tags` verbatim; legacy category
//!   keys are remapped on read through [`NoteRecord::shelf`].
//! - Missing values default to empty; a missing or zero timestamp becomes
//!   the import time.
//! - Every imported record gets a fresh id and the importing owner.

use crate::model::note::{Fields, NoteRecord};
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Top-level export document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportData {
    pub notes: Option<Vec<ExportedNote>>,
}

/// One exported note. Field names follow the export's snake_case schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportedNote {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub raw: Option<String>,
    pub tags: Option<Vec<String>>,
    pub hash_tags: Option<Vec<String>>,
    pub fields: Option<Fields>,
    pub timestamp: Option<i64>,
}

/// Import failure.
#[derive(Debug)]
pub enum ImportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// The document has no `notes` array.
    MissingNotes,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read export `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid export file: {err}"),
            Self::MissingNotes => write!(f, "invalid export file: missing notes array"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::MissingNotes => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl ExportedNote {
    fn into_record(self, user_id: &str, now_ms: i64) -> NoteRecord {
        NoteRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            raw: self.raw.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            hash_tags: self.hash_tags.unwrap_or_default(),
            fields: self.fields.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            timestamp: self.timestamp.filter(|ts| *ts != 0).unwrap_or(now_ms),
        }
    }
}

/// Converts an export document into records owned by `user_id`.
///
/// # Errors
/// - [`ImportError::Parse`] when `json` is not a valid export document.
/// - [`ImportError::MissingNotes`] when the `notes` array is absent.
pub fn import_export(json: &str, user_id: &str, now_ms: i64) -> Result<Vec<NoteRecord>, ImportError> {
    let data: ExportData = serde_json::from_str(json)?;
    let notes = data.notes.ok_or(ImportError::MissingNotes)?;

    let records: Vec<NoteRecord> = notes
        .into_iter()
        .map(|note| note.into_record(user_id, now_ms))
        .collect();

    info!(
        "event=export_import module=import status=ok count={}",
        records.len()
    );
    Ok(records)
}

/// Reads an export file from disk and converts it.
pub fn import_export_file(
    path: impl AsRef<Path>,
    user_id: &str,
    now_ms: i64,
) -> Result<Vec<NoteRecord>, ImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_export(&text, user_id, now_ms)
}
