//! Core domain logic for the personal to-do list.
//! This crate is the single source of truth for list invariants and for the
//! persisted snapshot.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_with_config, logging_status};
pub use model::task::{Task, TaskValidationError, TASK_REQUIRED_MESSAGE};
pub use model::task_list::{EditSession, PersistRequest, TaskList, TaskListError};
pub use repo::kv_repo::{KeyValueRepository, KvResult, SqliteKeyValueRepository};
pub use repo::snapshot_repo::{
    KvTaskSnapshotRepository, PersistenceError, PersistenceResult, SnapshotFault,
    TaskSnapshotRepository, TASKS_KEY,
};
pub use service::task_store::{LoadOutcome, TaskStore};

/// Task store backed by the SQLite key-value table.
pub type SqliteTaskStore = TaskStore<KvTaskSnapshotRepository<SqliteKeyValueRepository>>;

/// Opens the database at `path` and returns a store seeded from its snapshot.
pub fn open_sqlite_store(path: impl AsRef<std::path::Path>) -> db::DbResult<SqliteTaskStore> {
    let conn = db::open_db(path)?;
    Ok(TaskStore::open(KvTaskSnapshotRepository::new(
        SqliteKeyValueRepository::new(conn),
    )))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
