//! User account model.
//!
//! # Invariants
//! - `email` is unique across the `users` table.
//! - The stored password never leaves core: login results carry the email only.

use serde::Serialize;
use std::fmt::{Debug, Formatter};

/// How a password is written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Stored and compared as the literal string.
    Plain,
    /// Stored as an Argon2id PHC string.
    Argon2,
}

/// One row of the `users` table.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    /// Either a literal password or a PHC-format hash.
    pub password: String,
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Minimal payload returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUser {
    pub email: String,
}
