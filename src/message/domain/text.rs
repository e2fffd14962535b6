//! Validated message body.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum message length in characters, matching the `VARCHAR(140)` column.
pub const MAX_MESSAGE_LENGTH: usize = 140;

/// Trimmed, non-empty message body of at most 140 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    /// Creates a validated message body.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyText`] when the text is blank or
    /// [`MessageDomainError::TextTooLong`] when it exceeds
    /// [`MAX_MESSAGE_LENGTH`] characters after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(MessageDomainError::EmptyText);
        }

        let length = trimmed.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(MessageDomainError::TextTooLong {
                actual: length,
                max: MAX_MESSAGE_LENGTH,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
