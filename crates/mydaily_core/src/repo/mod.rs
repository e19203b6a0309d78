//! Repository layer: the document store adapter over SQLite.
//!
//! # Responsibility
//! - Own the single shared connection handle (`SqliteStore`).
//! - Define collection-oriented contracts for documents and users.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Every document write touches exactly one row inside one transaction.
//! - Repository APIs report absence with `Option`/`bool`, never as an error.

pub mod document_repo;
pub mod store;
pub mod user_repo;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for store reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted data could not be decoded.
    InvalidData(String),
    /// A user with this email already exists.
    DuplicateEmail(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::DuplicateEmail(email) => write!(f, "user already exists: {email}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::DuplicateEmail(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
