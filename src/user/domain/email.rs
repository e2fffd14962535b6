//! Validated email address type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an email address, matching the `VARCHAR(254)` column.
const MAX_EMAIL_LENGTH: usize = 254;

/// Lowercased email address with a single `@` separating non-empty parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// The input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyEmail`] when the value is empty after
    /// trimming, or [`UserDomainError::InvalidEmail`] when it is too long or
    /// not of the form `local@domain`.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(UserDomainError::EmptyEmail);
        }

        if normalized.chars().count() > MAX_EMAIL_LENGTH
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            });

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
