//! Repository port for message persistence and retrieval.

use crate::message::domain::{Message, MessageId, NewMessage};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message persistence contract.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::UnknownAuthor`] when the author
    /// does not exist.
    async fn insert(&self, message: &NewMessage) -> MessageRepositoryResult<Message>;

    /// Finds a message by identifier.
    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>>;

    /// Returns a user's messages, newest first.
    async fn list_for_user(&self, user: UserId) -> MessageRepositoryResult<Vec<Message>>;

    /// Counts a user's messages.
    async fn count_for_user(&self, user: UserId) -> MessageRepositoryResult<u64>;

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::NotFound`] when the message does not
    /// exist.
    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// The author does not exist.
    #[error("unknown message author: {0}")]
    UnknownAuthor(UserId),

    /// The message was not found.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
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
