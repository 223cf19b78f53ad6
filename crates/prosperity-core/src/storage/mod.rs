//! Persistence for the state document.
//!
//! The whole document lives in a single JSON file and is rewritten in full
//! after every mutation. Loads are defensive: a missing, unreadable or
//! unrecognizable file degrades to the default document instead of failing.

pub mod migrations;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::StorageError;
use crate::model::Document;

/// Returns `~/.config/prosperity[-dev]/` based on PROSPERITY_ENV.
///
/// Set PROSPERITY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PROSPERITY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("prosperity-dev")
    } else {
        base_dir.join("prosperity")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Handle to the on-disk state document.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    /// State file at the default location under [`data_dir`].
    pub fn default_path() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join("state.json"),
        })
    }

    /// State file at an explicit path (tests, alternate profiles).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, applying schema migrations.
    ///
    /// Never fails: a missing file yields the default seeded document, and
    /// malformed content is normalized or defaulted by the migration layer.
    pub fn load(&self) -> Document {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(raw) => migrations::migrate(raw),
                Err(e) => {
                    log::warn!(
                        "state file {} is not valid JSON, starting fresh: {e}",
                        self.path.display()
                    );
                    Document::default()
                }
            },
            Err(_) => Document::default(),
        }
    }

    /// Persist the full document under the current schema version.
    ///
    /// Writes to a temp file in the same directory, then renames over the
    /// target so readers never observe a partial document.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&self, doc: &Document) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(doc).map_err(StorageError::Serialize)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|source| StorageError::WriteFailed {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
