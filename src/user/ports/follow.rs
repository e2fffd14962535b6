//! Repository port for the follow graph.

use crate::user::domain::{Follow, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for follow repository operations.
pub type FollowRepositoryResult<T> = Result<T, FollowRepositoryError>;

/// Follow edge persistence contract.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Stores a follow edge.
    ///
    /// # Errors
    ///
    /// Returns [`FollowRepositoryError::DuplicateFollow`] when the edge
    /// already exists or [`FollowRepositoryError::UnknownUser`] when either
    /// end does not exist.
    async fn insert(&self, follow: &Follow) -> FollowRepositoryResult<()>;

    /// Removes a follow edge.
    ///
    /// # Errors
    ///
    /// Returns [`FollowRepositoryError::NotFound`] when the edge does not
    /// exist.
    async fn delete(&self, follow: &Follow) -> FollowRepositoryResult<()>;

    /// Returns whether the edge exists.
    async fn exists(&self, follow: &Follow) -> FollowRepositoryResult<bool>;

    /// Returns the users following `user`, ordered by identifier.
    async fn followers_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>>;

    /// Returns the users `user` follows, ordered by identifier.
    async fn following_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>>;
}

/// Errors returned by follow repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FollowRepositoryError {
    /// The edge already exists.
    #[error("duplicate follow: {0}")]
    DuplicateFollow(Follow),

    /// One end of the edge does not exist.
    #[error("unknown user in follow: {0}")]
    UnknownUser(Follow),

    /// The edge was not found.
    #[error("follow not found: {0}")]
    NotFound(Follow),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FollowRepositoryError {
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
