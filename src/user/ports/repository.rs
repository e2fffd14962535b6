//! Repository port for user persistence and lookup.

use crate::user::domain::{Email, NewUser, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUsername`] or
    /// [`UserRepositoryError::DuplicateEmail`] when either is already taken.
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User>;

    /// Persists profile changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Deletes a user together with their messages and follow edges.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>>;

    /// Returns every user ordered by identifier.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// Another user already has this username.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// Another user already has this email address.
    #[error("duplicate email: {0}")]
    DuplicateEmail(Email),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    pub(crate) fn from_boxed(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Persistence(Arc::from(err))
    }
}
