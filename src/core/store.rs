//! Store - the JSON data file
//!
//! The whole application state is one document, read once at startup and
//! rewritten wholesale on every save.
//!
//! # Key Points
//! - Loading never fails: a missing file is an empty document, an
//!   unreadable one is an empty document plus a warning
//! - Saving writes a temp file beside the target and renames it over
//! - No locking; the file belongs to the single running session

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::note::Note;
use super::task::Task;
use super::time;

/// Errors from reading or writing the data file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not replace {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Snapshot of everything that survives between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub notes: Vec<Note>,

    /// User name captured at first start
    #[serde(default)]
    pub user: String,

    #[serde(default, with = "time::second_opt")]
    pub last_saved: Option<NaiveDateTime>,
}

/// Result of [`Store::load`]
#[derive(Debug)]
pub struct Loaded {
    pub document: Document,
    /// Set when the file existed but could not be used
    pub warning: Option<StoreError>,
}

/// File-backed document store
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the data file in bytes, 0 when absent
    pub fn file_size(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Read the document, falling back to an empty one
    pub fn load(&self) -> Loaded {
        match self.try_load() {
            Ok(document) => Loaded {
                document: document.unwrap_or_default(),
                warning: None,
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "falling back to empty data");
                Loaded {
                    document: Document::default(),
                    warning: Some(e),
                }
            }
        }
    }

    /// Read the document; `Ok(None)` when the file does not exist
    pub fn try_load(&self) -> Result<Option<Document>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let document: Document =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            tasks = document.tasks.len(),
            notes = document.notes.len(),
            "data loaded"
        );
        Ok(Some(document))
    }

    /// Stamp `last_saved` and write the document. Returns false on failure.
    pub fn save(&self, document: &mut Document) -> bool {
        match self.try_save(document) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "save failed");
                false
            }
        }
    }

    /// Stamp `last_saved` and write the document, replacing the file atomically
    pub fn try_save(&self, document: &mut Document) -> Result<(), StoreError> {
        document.last_saved = Some(time::now_second());
        let json = serde_json::to_string_pretty(&*document)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        info!(
            path = %self.path.display(),
            tasks = document.tasks.len(),
            notes = document.notes.len(),
            "data saved"
        );
        Ok(())
    }

    /// Delete the data file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "data file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::NoteRegistry;
    use crate::core::task::{Priority, TaskRegistry};
    use anyhow::Result;

    fn sample_document() -> Document {
        let mut tasks = TaskRegistry::default();
        tasks.add("Write report", Priority::High).unwrap();
        tasks.add("Buy milk", Priority::Low).unwrap();
        tasks.add("Call bank", Priority::Medium).unwrap();
        tasks.complete(2);

        let mut notes = NoteRegistry::default();
        notes.add("Standup at 9", "Work").unwrap();
        notes.add("Try the new cafe", "").unwrap();

        Document {
            tasks: tasks.into_tasks(),
            notes: notes.into_notes(),
            user: "Ada".to_string(),
            last_saved: None,
        }
    }

    #[test]
    fn test_missing_file_is_empty_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("data.json"));

        let loaded = store.load();
        assert_eq!(loaded.document, Document::default());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn test_corrupt_file_is_empty_with_warning() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json")?;

        let loaded = Store::new(&path).load();
        assert!(loaded.document.tasks.is_empty());
        assert!(loaded.document.user.is_empty());
        assert!(matches!(loaded.warning, Some(StoreError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_save_then_load_preserves_entities() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Store::new(dir.path().join("data.json"));

        let mut original = sample_document();
        assert!(store.save(&mut original));
        assert!(original.last_saved.is_some());

        let loaded = store.try_load()?.unwrap();
        assert_eq!(loaded.tasks, original.tasks);
        assert_eq!(loaded.notes, original.notes);
        assert_eq!(loaded.user, "Ada");

        // A second cycle changes nothing but the stamp.
        let mut again = loaded.clone();
        assert!(store.save(&mut again));
        let reloaded = store.try_load()?.unwrap();
        assert_eq!(reloaded.tasks, loaded.tasks);
        assert_eq!(reloaded.notes, loaded.notes);
        assert_eq!(reloaded.user, loaded.user);
        Ok(())
    }

    #[test]
    fn test_saved_file_has_all_top_level_fields() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.json");
        let mut document = Document::default();
        Store::new(&path).try_save(&mut document)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        for key in ["tasks", "notes", "user", "last_saved"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["last_saved"].is_string());
        Ok(())
    }

    #[test]
    fn test_save_creates_parent_dirs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Store::new(dir.path().join("nested").join("deeper").join("data.json"));
        store.try_save(&mut sample_document())?;
        assert!(store.path().exists());
        Ok(())
    }

    #[test]
    fn test_save_failure_returns_false() -> Result<()> {
        let dir = tempfile::tempdir()?;
        // A directory where the file should be cannot be replaced.
        let path = dir.path().join("data.json");
        std::fs::create_dir(&path)?;
        std::fs::write(path.join("occupied"), "x")?;

        assert!(!Store::new(&path).save(&mut sample_document()));
        Ok(())
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_missing() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Store::new(dir.path().join("data.json"));
        store.try_save(&mut sample_document())?;
        assert!(store.file_size() > 0);

        store.clear()?;
        assert!(!store.path().exists());
        store.clear()?;
        assert_eq!(store.file_size(), 0);
        Ok(())
    }

    #[test]
    fn test_reads_documents_with_missing_keys() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.json");
        let raw = r#"{"tasks": [{
            "id": 1, "task": "old", "priority": "Low 🟢", "created": "2024-05-01 08:30",
            "completed": true, "completed_at": "2024-05-02 09:00"
        }]}"#;
        std::fs::write(&path, raw)?;

        let document = Store::new(&path).try_load()?.unwrap();
        assert_eq!(document.tasks.len(), 1);
        assert_eq!(document.tasks[0].priority, Priority::Low);
        assert!(document.tasks[0].completed_at.is_some());
        assert!(document.notes.is_empty());
        assert_eq!(document.user, "");
        assert!(document.last_saved.is_none());
        Ok(())
    }

    #[test]
    fn test_foreign_timestamps_keep_the_document() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("data.json");
        let raw = r#"{
            "tasks": [{"id": 1, "task": "keep me", "priority": "High",
                       "created": "2024-05-01T08:30:00", "completed": false}],
            "notes": [{"id": 1, "note": "and me", "category": "Work", "created": "whenever"}],
            "user": "Ada",
            "last_saved": "2024-05-01T08:30:00"
        }"#;
        std::fs::write(&path, raw)?;

        let loaded = Store::new(&path).load();
        assert!(loaded.warning.is_none());
        let document = loaded.document;
        assert_eq!(document.user, "Ada");
        assert_eq!(document.tasks[0].description, "keep me");
        assert_eq!(document.tasks[0].created, time::parse("2024-05-01 08:30")?);
        assert_eq!(document.notes[0].text, "and me");
        assert!(document.last_saved.is_some());

        std::fs::write(&path, raw.replace("2024-05-01T08:30:00\"\n", "not a date\"\n"))?;
        let document = Store::new(&path).try_load()?.unwrap();
        assert_eq!(document.tasks.len(), 1);
        assert!(document.last_saved.is_none());
        Ok(())
    }
}
