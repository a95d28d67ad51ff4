//! Progress persistence: the external collaborator boundary
//!
//! The game core only ever hands a completion tuple across the narrow
//! `ProgressStore` interface. Writes are best-effort: a failure is logged
//! and returned to the caller, and the student-facing completion flow
//! proceeds regardless.

use std::fs;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::CompletionSummary;

/// Failures from a progress store
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("progress store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("progress record serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stored result for one student at one waypoint, keyed by
/// `(student_id, waypoint_id)`. Referenced, not owned: the core treats this
/// purely as a write target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub student_id: String,
    pub waypoint_id: String,
    pub completed: bool,
    pub score: u32,
    pub mistakes: u32,
    pub attempts: u32,
    pub time_spent_secs: u64,
}

/// Narrow upsert/query interface onto the persistence collaborator
pub trait ProgressStore {
    /// Insert or replace the record for the record's `(student, waypoint)` key
    fn upsert(&mut self, record: ProgressRecord) -> Result<(), PersistError>;

    /// The record for one student at one waypoint, if any
    fn fetch(
        &self,
        student_id: &str,
        waypoint_id: &str,
    ) -> Result<Option<ProgressRecord>, PersistError>;

    /// Every stored record, ordered by student then waypoint
    fn all(&self) -> Result<Vec<ProgressRecord>, PersistError>;
}

fn sorted_records(index: &FxHashMap<(String, String), ProgressRecord>) -> Vec<ProgressRecord> {
    let mut records: Vec<ProgressRecord> = index.values().cloned().collect();
    records.sort_by(|a, b| {
        (&a.student_id, &a.waypoint_id).cmp(&(&b.student_id, &b.waypoint_id))
    });
    records
}

/// In-memory store for tests and embedding
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: FxHashMap<(String, String), ProgressRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn upsert(&mut self, record: ProgressRecord) -> Result<(), PersistError> {
        let key = (record.student_id.clone(), record.waypoint_id.clone());
        self.records.insert(key, record);
        Ok(())
    }

    fn fetch(
        &self,
        student_id: &str,
        waypoint_id: &str,
    ) -> Result<Option<ProgressRecord>, PersistError> {
        let key = (student_id.to_string(), waypoint_id.to_string());
        Ok(self.records.get(&key).cloned())
    }

    fn all(&self) -> Result<Vec<ProgressRecord>, PersistError> {
        Ok(sorted_records(&self.records))
    }
}

/// File-backed store: one pretty-printed JSON document.
///
/// A missing file opens as an empty store; a malformed one is an error.
/// Every upsert writes the file through, so a crash loses at most the
/// in-flight record.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: FxHashMap<(String, String), ProgressRecord>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) => {
                let list: Vec<ProgressRecord> = serde_json::from_str(&content)?;
                list.into_iter()
                    .map(|r| ((r.student_id.clone(), r.waypoint_id.clone()), r))
                    .collect()
            }
            Err(_) => FxHashMap::default(),
        };
        Ok(JsonFileStore { path, records })
    }

    fn save(&self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let records = sorted_records(&self.records);
        fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn upsert(&mut self, record: ProgressRecord) -> Result<(), PersistError> {
        let key = (record.student_id.clone(), record.waypoint_id.clone());
        self.records.insert(key, record);
        self.save()
    }

    fn fetch(
        &self,
        student_id: &str,
        waypoint_id: &str,
    ) -> Result<Option<ProgressRecord>, PersistError> {
        let key = (student_id.to_string(), waypoint_id.to_string());
        Ok(self.records.get(&key).cloned())
    }

    fn all(&self) -> Result<Vec<ProgressRecord>, PersistError> {
        Ok(sorted_records(&self.records))
    }
}

/// Fire-and-forget completion write.
///
/// A failed write is logged and handed back so the caller may retry or
/// ignore it; the completion screen is shown either way.
pub fn record_completion(
    store: &mut dyn ProgressStore,
    student_id: &str,
    waypoint_id: &str,
    summary: &CompletionSummary,
) -> Result<(), PersistError> {
    let record = ProgressRecord {
        student_id: student_id.to_string(),
        waypoint_id: waypoint_id.to_string(),
        completed: true,
        score: summary.score,
        mistakes: summary.mistakes,
        attempts: summary.attempts,
        time_spent_secs: summary.time_spent_secs,
    };

    match store.upsert(record) {
        Ok(()) => {
            tracing::debug!(student_id, waypoint_id, score = summary.score, "progress recorded");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(
                student_id,
                waypoint_id,
                error = %e,
                "completion write failed; continuing without saved progress"
            );
            Err(e)
        }
    }
}
