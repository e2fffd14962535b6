//! Error types for message validation.

use thiserror::Error;

/// Errors returned while constructing message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The text is empty after trimming.
    #[error("message text must not be empty")]
    EmptyText,

    /// The text exceeds the length limit.
    #[error("message text has {actual} characters, exceeds limit of {max}")]
    TextTooLong {
        /// Characters supplied.
        actual: usize,
        /// Maximum accepted characters.
        max: usize,
    },
}
