//! Error types for user domain validation.

use super::UserId;
use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// A required signup field was not supplied.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains whitespace.
    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),

    /// The username exceeds the 50-character storage limit.
    #[error("username exceeds 50 character limit: {0}")]
    UsernameTooLong(String),

    /// The email is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email is not of the form `local@domain`.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// A user attempted to follow themself.
    #[error("user {0} cannot follow themself")]
    SelfFollow(UserId),
}
