//! Password hashing and verification.
//!
//! Stored passwords come in two representations: Argon2id PHC strings
//! (`$argon2id$v=19$...`) and literal plain-text values seeded before hashing
//! was introduced. Verification dispatches on the stored representation.

use crate::model::user::PasswordScheme;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

const ARGON2_PHC_PREFIX: &str = "$argon2";

/// Hashes a password with Argon2id and returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| format!("failed to hash password: {err}"))
}

/// Encodes a password for storage under the given scheme.
pub fn encode_password(password: &str, scheme: PasswordScheme) -> Result<String, String> {
    match scheme {
        PasswordScheme::Plain => Ok(password.to_string()),
        PasswordScheme::Argon2 => hash_password(password),
    }
}

/// Returns the scheme a stored password was written with.
pub fn stored_scheme(stored: &str) -> PasswordScheme {
    if stored.starts_with(ARGON2_PHC_PREFIX) {
        PasswordScheme::Argon2
    } else {
        PasswordScheme::Plain
    }
}

/// Checks a candidate password against its stored representation.
///
/// Returns `Ok(false)` on mismatch and `Err` when a stored hash is malformed.
pub fn verify_password(candidate: &str, stored: &str) -> Result<bool, String> {
    match stored_scheme(stored) {
        PasswordScheme::Plain => Ok(candidate == stored),
        PasswordScheme::Argon2 => {
            let parsed =
                PasswordHash::new(stored).map_err(|err| format!("invalid password hash: {err}"))?;
            Ok(Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok())
        }
    }
}
