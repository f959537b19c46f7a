//! Key-value repository contract and SQLite implementation.
//!
//! # Invariants
//! - `set_value` is an upsert; the latest write for a key wins.
//! - Keys are compared exactly (no trimming or case folding).

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

pub type KvResult<T> = Result<T, DbError>;

/// Durable string-to-string storage.
pub trait KeyValueRepository {
    fn get_value(&self, key: &str) -> KvResult<Option<String>>;
    fn set_value(&self, key: &str, value: &str) -> KvResult<()>;
    /// Returns whether a value existed for `key`.
    fn remove_value(&self, key: &str) -> KvResult<bool>;
}

/// SQLite-backed key-value repository over the `kv_store` table.
///
/// Owns its connection so a task store can live for the whole process.
pub struct SqliteKeyValueRepository {
    conn: Connection,
}

impl SqliteKeyValueRepository {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueRepository for SqliteKeyValueRepository {
    fn get_value(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=kv_get module=repo status=ok key={key} found={}",
            value.is_some()
        );
        Ok(value)
    }

    fn set_value(&self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=repo status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove_value(&self, key: &str) -> KvResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueRepository, SqliteKeyValueRepository};
    use crate::db::open_db_in_memory;

    fn repo() -> SqliteKeyValueRepository {
        SqliteKeyValueRepository::new(open_db_in_memory().expect("in-memory db should open"))
    }

    #[test]
    fn missing_key_reads_as_none() {
        assert_eq!(repo().get_value("tasks").unwrap(), None);
    }

    #[test]
    fn set_value_upserts() {
        let repo = repo();
        repo.set_value("tasks", "first").unwrap();
        repo.set_value("tasks", "second").unwrap();

        assert_eq!(repo.get_value("tasks").unwrap().as_deref(), Some("second"));
        let rows: i64 = repo
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn remove_value_reports_presence() {
        let repo = repo();
        repo.set_value("tasks", "[]").unwrap();

        assert!(repo.remove_value("tasks").unwrap());
        assert!(!repo.remove_value("tasks").unwrap());
        assert_eq!(repo.get_value("tasks").unwrap(), None);
    }
}
