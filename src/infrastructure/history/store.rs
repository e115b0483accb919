//! JSON-file history store.
//!
//! The history is a single JSON array of task records, overwritten
//! wholesale on every save. A missing or unreadable file is not an error:
//! it loads as an empty history. Saving is the one loud operation: I/O
//! failures propagate to the caller.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TaskRecord;

/// Ordered, append-only collection of task records backed by one file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<TaskRecord>,
}

impl HistoryStore {
    /// Open a store at `path`, eagerly loading whatever history exists.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = Self::load(&path);
        Self { path, records }
    }

    /// Read and parse the history file. Missing or corrupt storage yields
    /// an empty collection, never an error.
    fn load(path: &Path) -> Vec<TaskRecord> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No history file, starting empty");
                return Vec::new();
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "History file unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %path.display(), %err, "History file corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the file.
    pub fn save(&self) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, content)
            .map_err(|err| DomainError::Persistence(format!("{}: {err}", self.path.display())))?;
        debug!(path = %self.path.display(), count = self.records.len(), "History saved");
        Ok(())
    }

    /// Append one completed record and persist immediately.
    pub fn append(&mut self, record: TaskRecord) -> DomainResult<()> {
        self.records.push(record);
        self.save()
    }

    /// Replace the collection with empty and persist immediately.
    pub fn clear(&mut self) -> DomainResult<()> {
        self.records.clear();
        self.save()
    }

    /// All records, in insertion (chronological run) order.
    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// Find a record by its short id.
    pub fn find(&self, id: &str) -> Option<&TaskRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
