//! Credential verification use-cases.
//!
//! # Responsibility
//! - Check an email/password pair against the user collection.
//! - Seed new accounts for operator tooling.
//!
//! # Invariants
//! - Login is read-only and never echoes the stored password.
//! - Unknown email and wrong password are distinct outcomes.

use crate::model::user::{LoginUser, PasswordScheme, User};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use crate::service::password::{encode_password, verify_password};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Service error for credential use-cases.
#[derive(Debug)]
pub enum AuthError {
    /// No user is registered under the given email.
    UserNotFound,
    /// The user exists but the password does not match.
    InvalidCredential,
    /// Registration input rejected before reaching storage.
    InvalidInput(&'static str),
    /// Stored hash could not be parsed, or hashing failed.
    PasswordHash(String),
    Repo(RepoError),
}

impl AuthError {
    /// Stable code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "user_not_found",
            Self::InvalidCredential => "invalid_credential",
            Self::InvalidInput(_) => "invalid_input",
            Self::PasswordHash(_) => "password_hash_failed",
            Self::Repo(_) => "store_failed",
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound => write!(f, "user not found"),
            Self::InvalidCredential => write!(f, "wrong password"),
            Self::InvalidInput(details) => write!(f, "invalid input: {details}"),
            Self::PasswordHash(details) => write!(f, "{details}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Credential verifier over a shared user repository.
pub struct AuthService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Verifies one email/password pair.
    ///
    /// # Errors
    /// - `UserNotFound` when no user matches `email` exactly.
    /// - `InvalidCredential` when the password does not match.
    /// - `PasswordHash`/`Repo` for storage-side failures.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginUser, AuthError> {
        let user = self
            .repo
            .find_user_by_email(email)?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &user.password).map_err(AuthError::PasswordHash)? {
            return Err(AuthError::InvalidCredential);
        }

        Ok(LoginUser { email: user.email })
    }

    /// Registers a new user, encoding the password with `scheme`.
    pub fn register_user(
        &self,
        email: &str,
        password: &str,
        scheme: PasswordScheme,
    ) -> Result<LoginUser, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::InvalidInput("email cannot be empty"));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password cannot be empty"));
        }

        let stored = encode_password(password, scheme).map_err(AuthError::PasswordHash)?;
        let user = User {
            email: email.to_string(),
            password: stored,
        };

        match self.repo.insert_user(&user) {
            Ok(()) => {
                info!("event=user_register module=auth status=ok scheme={scheme:?}");
                Ok(LoginUser { email: user.email })
            }
            Err(err) => {
                warn!(
                    "event=user_register module=auth status=error error_code=store_failed error={err}"
                );
                Err(err.into())
            }
        }
    }
}
