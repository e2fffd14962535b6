//! Validated username type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username, matching the `VARCHAR(50)` column.
const MAX_USERNAME_LENGTH: usize = 50;

/// Unique handle a user signs in with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// The input is trimmed. Case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] when the value is empty
    /// after trimming, [`UserDomainError::InvalidUsername`] when it contains
    /// whitespace, or [`UserDomainError::UsernameTooLong`] when it exceeds
    /// 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }

        if trimmed.chars().count() > MAX_USERNAME_LENGTH {
            return Err(UserDomainError::UsernameTooLong(raw));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserDomainError::InvalidUsername(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
