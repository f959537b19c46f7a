//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have every migration applied.
//! - File-backed databases get their parent directory created on demand.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the task database file and applies pending migrations.
///
/// # Side effects
/// - Creates missing parent directories of `path`.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let result = ensure_parent_dir(path).and_then(|()| {
        let conn = Connection::open(path)?;
        bootstrap_connection(conn)
    });
    finish_open("file", started_at, result)
}

/// Opens an in-memory database with the same bootstrap as [`open_db`].
///
/// Used by tests and by hosts that only need a throwaway session.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(bootstrap_connection);
    finish_open("memory", started_at, result)
}

fn finish_open(
    mode: &str,
    started_at: Instant,
    result: DbResult<Connection>,
) -> DbResult<Connection> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={} error={err}",
            error_code(err)
        ),
    }
    result
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| DbError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn bootstrap_connection(mut conn: Connection) -> DbResult<Connection> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Io { .. } => "db_dir_failed",
        DbError::Sqlite(_) => "db_open_failed",
        DbError::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
    }
}
