//! Password hashing port.

use crate::user::domain::{PasswordHash, PlainPassword};
use thiserror::Error;

/// Errors raised while hashing or verifying a password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The stored hash is not a recognisable PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    /// The hashing algorithm failed or was misconfigured.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// One-way password hashing.
///
/// Implementations must salt every hash; verification never compares
/// plaintext.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when the algorithm fails.
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Checks a candidate password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::MalformedHash`] when the stored hash
    /// cannot be parsed.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError>;
}
