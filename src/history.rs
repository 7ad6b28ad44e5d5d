//! Local session-history index.
//!
//! The agent service does not expose a history-listing capability, so past
//! sessions are tracked in a file-backed index on the device. The index is a
//! convenience only, never a source of truth: deleting an entry here does
//! nothing on the backend, and the backend may forget sessions the index
//! still lists.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::observability;
use crate::utils::rfc3339;

/// Longest preview text stored per entry.
const PREVIEW_MAX_CHARS: usize = 80;

/// One remembered session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The backend-issued session handle.
    pub id: String,

    /// When the session was started on this device.
    #[serde(with = "rfc3339")]
    pub created_at: OffsetDateTime,

    /// First user message of the session, truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct HistoryFile {
    version: u8,
    entries: Vec<HistoryEntry>,
}

impl HistoryFile {
    fn new(entries: &[HistoryEntry]) -> Self {
        Self {
            version: 1,
            entries: entries.to_vec(),
        }
    }
}

/// File-backed index of past sessions, newest first.
///
/// Every mutation is written through to disk immediately; there is no
/// separate flush step. Single-writer, single-reader, same execution
/// context.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Opens the index at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let file = File::open(&path)
                .map_err(|err| Error::io("failed to open history file", err))?;
            let reader = BufReader::new(file);
            let history: HistoryFile = from_reader(reader).map_err(|err| {
                Error::serialization("failed to parse history file", Some(Box::new(err)))
            })?;
            history.entries
        } else {
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    /// The remembered sessions, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns true if the index remembers `session_id`.
    pub fn contains(&self, session_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == session_id)
    }

    /// Records a newly created session at the front of the index.
    pub fn record(&mut self, session_id: impl Into<String>) -> Result<()> {
        let entry = HistoryEntry {
            id: session_id.into(),
            created_at: OffsetDateTime::now_utc(),
            preview: None,
        };
        self.entries.insert(0, entry);
        self.save()
    }

    /// Sets the preview text for a session if it has none yet.
    ///
    /// The preview is the first user message of the session; later messages
    /// never replace it.
    pub fn set_preview(&mut self, session_id: &str, preview: &str) -> Result<()> {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == session_id)
        else {
            return Ok(());
        };
        if entry.preview.is_some() {
            return Ok(());
        }
        entry.preview = Some(truncate_preview(preview));
        self.save()
    }

    /// Removes exactly the entry for `session_id`.
    ///
    /// Returns true when an entry was removed. Unknown handles are a no-op,
    /// not an error.
    pub fn delete(&mut self, session_id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != session_id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        observability::HISTORY_WRITES.click();
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create history file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &HistoryFile::new(&self.entries)).map_err(|err| {
            Error::serialization("failed to serialize history file", Some(Box::new(err)))
        })
    }
}

fn truncate_preview(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= PREVIEW_MAX_CHARS {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::open(dir.path().join("history.json")).unwrap()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn record_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::open(&path).unwrap();
        store.record("S1").unwrap();
        store.record("S2").unwrap();
        store.set_preview("S2", "I need help paying for a root canal").unwrap();

        let store = HistoryStore::open(&path).unwrap();
        assert_eq!(store.entries().len(), 2);
        // Newest first.
        assert_eq!(store.entries()[0].id, "S2");
        assert_eq!(
            store.entries()[0].preview.as_deref(),
            Some("I need help paying for a root canal")
        );
        assert!(store.entries()[1].preview.is_none());
    }

    #[test]
    fn preview_is_write_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.record("S1").unwrap();
        store.set_preview("S1", "first").unwrap();
        store.set_preview("S1", "second").unwrap();
        assert_eq!(store.entries()[0].preview.as_deref(), Some("first"));
    }

    #[test]
    fn long_previews_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.record("S1").unwrap();
        let long = "x".repeat(200);
        store.set_preview("S1", &long).unwrap();
        let preview = store.entries()[0].preview.as_deref().unwrap();
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 1);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn delete_removes_exactly_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut store = HistoryStore::open(&path).unwrap();
        store.record("S1").unwrap();
        store.record("S2").unwrap();
        store.record("S3").unwrap();

        assert!(store.delete("S2").unwrap());
        assert!(!store.delete("S2").unwrap());

        let store = HistoryStore::open(&path).unwrap();
        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["S3", "S1"]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.record("S1").unwrap();
        assert!(!store.delete("nope").unwrap());
        assert_eq!(store.entries().len(), 1);
    }
}
