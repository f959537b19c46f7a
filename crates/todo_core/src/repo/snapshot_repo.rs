//! Task list snapshot persistence over a key-value repository.
//!
//! # Responsibility
//! - Serialize the full ordered task list to JSON under one fixed key.
//! - Read it back, distinguishing "never saved" from "unreadable".
//!
//! # Invariants
//! - Stored value is a JSON array of strings; nothing else is accepted on read.
//! - `read_tasks` after `save_tasks(list)` returns `list` unchanged.

use crate::db::DbError;
use crate::model::task::Task;
use crate::repo::kv_repo::KeyValueRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the task list snapshot is stored.
pub const TASKS_KEY: &str = "tasks";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Underlying reason for a snapshot read or write failure.
#[derive(Debug)]
pub enum SnapshotFault {
    /// Storage layer failed (I/O, SQLite, full disk).
    Storage(DbError),
    /// Snapshot text could not be encoded or decoded.
    Format(serde_json::Error),
}

impl Display for SnapshotFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage failure: {err}"),
            Self::Format(err) => write!(f, "malformed snapshot: {err}"),
        }
    }
}

/// Snapshot persistence error, split by direction.
#[derive(Debug)]
pub enum PersistenceError {
    Read(SnapshotFault),
    Write(SnapshotFault),
}

impl PersistenceError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read(SnapshotFault::Storage(_)) => "snapshot_read_storage",
            Self::Read(SnapshotFault::Format(_)) => "snapshot_read_corrupt",
            Self::Write(SnapshotFault::Storage(_)) => "snapshot_write_storage",
            Self::Write(SnapshotFault::Format(_)) => "snapshot_write_encode",
        }
    }

    pub fn fault(&self) -> &SnapshotFault {
        match self {
            Self::Read(fault) | Self::Write(fault) => fault,
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(fault) => write!(f, "failed to read task snapshot: {fault}"),
            Self::Write(fault) => write!(f, "failed to write task snapshot: {fault}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.fault() {
            SnapshotFault::Storage(err) => Some(err),
            SnapshotFault::Format(err) => Some(err),
        }
    }
}

/// Storage contract for the complete task list.
pub trait TaskSnapshotRepository {
    /// Replaces the stored snapshot with `tasks`.
    fn save_tasks(&self, tasks: &[Task]) -> PersistenceResult<()>;
    /// Returns `Ok(None)` when no snapshot has ever been saved.
    fn read_tasks(&self) -> PersistenceResult<Option<Vec<Task>>>;
}

/// JSON snapshot stored under [`TASKS_KEY`] in any key-value repository.
pub struct KvTaskSnapshotRepository<K: KeyValueRepository> {
    kv: K,
}

impl<K: KeyValueRepository> KvTaskSnapshotRepository<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueRepository> TaskSnapshotRepository for KvTaskSnapshotRepository<K> {
    fn save_tasks(&self, tasks: &[Task]) -> PersistenceResult<()> {
        let encoded = encode_snapshot(tasks)
            .map_err(|err| PersistenceError::Write(SnapshotFault::Format(err)))?;
        self.kv
            .set_value(TASKS_KEY, &encoded)
            .map_err(|err| PersistenceError::Write(SnapshotFault::Storage(err)))
    }

    fn read_tasks(&self) -> PersistenceResult<Option<Vec<Task>>> {
        let stored = self
            .kv
            .get_value(TASKS_KEY)
            .map_err(|err| PersistenceError::Read(SnapshotFault::Storage(err)))?;

        match stored {
            Some(text) => decode_snapshot(&text)
                .map(Some)
                .map_err(|err| PersistenceError::Read(SnapshotFault::Format(err))),
            None => Ok(None),
        }
    }
}

/// Serializes tasks to the on-disk form: a JSON array of strings.
pub fn encode_snapshot(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tasks)
}

/// Parses the on-disk form back into ordered tasks.
pub fn decode_snapshot(text: &str) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_str(text)
}
