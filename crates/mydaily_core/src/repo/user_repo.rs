//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Email lookups are exact, case-sensitive matches.
//! - Inserting an existing email fails with `RepoError::DuplicateEmail`.

use crate::model::user::User;
use crate::repo::store::SqliteStore;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, ErrorCode, OptionalExtension};

/// Repository interface for the user collection.
pub trait UserRepository {
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn insert_user(&self, user: &User) -> RepoResult<()>;
}

impl UserRepository for SqliteStore {
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    "SELECT email, password
                     FROM users
                     WHERE email = ?1
                     LIMIT 1;",
                    [email],
                    |row| {
                        Ok(User {
                            email: row.get("email")?,
                            password: row.get("password")?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
    }

    fn insert_user(&self, user: &User) -> RepoResult<()> {
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO users (email, password) VALUES (?1, ?2);",
                params![user.email.as_str(), user.password.as_str()],
            ) {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    Err(RepoError::DuplicateEmail(user.email.clone()))
                }
                Err(err) => Err(err.into()),
            }
        })
    }
}
