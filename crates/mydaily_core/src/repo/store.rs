//! Shared store handle.
//!
//! # Responsibility
//! - Hold the one long-lived connection opened at startup.
//! - Serialize access to it so the handle can be shared across threads.
//!
//! # Invariants
//! - The wrapped connection has all migrations applied.
//! - A poisoned lock is reported as `DbError::LockPoisoned`, never a panic.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

const REQUIRED_TABLES: [&str; 2] = ["users", "documents"];

/// SQLite-backed document store shared by every handler.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wraps a migrated connection, verifying the required tables exist.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (creating if needed) and migrates a database file.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database; used by tests and dry runs.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub(crate) fn with_conn<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| RepoError::Db(DbError::LockPoisoned))?;
        op(&mut guard)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in REQUIRED_TABLES {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
