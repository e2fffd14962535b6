//! Service layer for the follow graph.

use crate::user::{
    domain::{Follow, User, UserConnections, UserDomainError, UserId},
    ports::{FollowRepository, FollowRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for follow operations.
#[derive(Debug, Error)]
pub enum FollowServiceError {
    /// The edge is invalid (for example a self-follow).
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] FollowRepositoryError),
}

/// Result type for follow service operations.
pub type FollowServiceResult<T> = Result<T, FollowServiceError>;

/// Follow, unfollow, and follow-graph queries.
#[derive(Clone)]
pub struct FollowService<R>
where
    R: FollowRepository,
{
    repository: Arc<R>,
}

impl<R> FollowService<R>
where
    R: FollowRepository,
{
    /// Creates a new follow service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records that `follower` follows `followed`.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Domain`] for a self-follow, or
    /// [`FollowServiceError::Repository`] when the edge exists already, a
    /// user is unknown, or persistence fails.
    pub async fn follow(&self, follower: UserId, followed: UserId) -> FollowServiceResult<Follow> {
        let edge = Follow::new(followed, follower)?;
        self.repository.insert(&edge).await?;
        tracing::info!(%follower, %followed, "follow recorded");
        Ok(edge)
    }

    /// Removes the edge "`follower` follows `followed`".
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when the edge does not
    /// exist or persistence fails.
    pub async fn unfollow(&self, follower: UserId, followed: UserId) -> FollowServiceResult<()> {
        let edge = Follow::new(followed, follower)?;
        self.repository.delete(&edge).await?;
        tracing::info!(%follower, %followed, "follow removed");
        Ok(())
    }

    /// Returns `true` when `user` follows `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when lookup fails.
    pub async fn is_following(&self, user: &User, other: &User) -> FollowServiceResult<bool> {
        self.edge_exists(other.id(), user.id()).await
    }

    /// Returns `true` when `other` follows `user`.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when lookup fails.
    pub async fn is_followed_by(&self, user: &User, other: &User) -> FollowServiceResult<bool> {
        self.edge_exists(user.id(), other.id()).await
    }

    /// Returns the users following `user`.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when lookup fails.
    pub async fn followers(&self, user: UserId) -> FollowServiceResult<Vec<User>> {
        Ok(self.repository.followers_of(user).await?)
    }

    /// Returns the users `user` follows.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when lookup fails.
    pub async fn following(&self, user: UserId) -> FollowServiceResult<Vec<User>> {
        Ok(self.repository.following_of(user).await?)
    }

    /// Loads both sides of `user`'s follow graph.
    ///
    /// # Errors
    ///
    /// Returns [`FollowServiceError::Repository`] when lookup fails.
    pub async fn connections(&self, user: UserId) -> FollowServiceResult<UserConnections> {
        let followers = self.repository.followers_of(user).await?;
        let following = self.repository.following_of(user).await?;
        Ok(UserConnections::new(
            user,
            followers.iter().map(User::id),
            following.iter().map(User::id),
        ))
    }

    async fn edge_exists(&self, followed: UserId, follower: UserId) -> FollowServiceResult<bool> {
        // Nobody follows themself.
        let Ok(edge) = Follow::new(followed, follower) else {
            return Ok(false);
        };
        let exists = self.repository.exists(&edge).await?;
        tracing::debug!(%follower, %followed, exists, "follow lookup");
        Ok(exists)
    }
}
