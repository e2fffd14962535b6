//! Credential types.
//!
//! [`PlainPassword`] only lives long enough to be hashed or verified;
//! [`PasswordHash`] is what gets persisted.

use super::UserDomainError;
use std::fmt;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A password as typed by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    /// Creates a password that satisfies the length policy.
    ///
    /// Surrounding whitespace is significant and kept.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::PasswordTooShort`] when the password has
    /// fewer than [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let value = value.into();
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserDomainError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw password.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Stored password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a hash string read from storage or produced by a hasher.
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hash string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
