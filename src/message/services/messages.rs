//! Service layer for posting, reading, and deleting messages.

use crate::message::{
    domain::{Message, MessageDomainError, MessageId, MessageText, NewMessage},
    ports::{MessageRepository, MessageRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for message operations.
#[derive(Debug, Error)]
pub enum MessageServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] MessageDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MessageRepositoryError),
    /// The requester is not the author of the message.
    #[error("user {requester} is not the author of message {message}")]
    NotAuthor {
        /// The user attempting the operation.
        requester: UserId,
        /// The message concerned.
        message: MessageId,
    },
}

/// Result type for message service operations.
pub type MessageServiceResult<T> = Result<T, MessageServiceError>;

/// Message orchestration service.
#[derive(Clone)]
pub struct MessageService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MessageService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new message service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a message on behalf of `author`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Domain`] when the text is blank or too
    /// long, or [`MessageServiceError::Repository`] when the author is
    /// unknown or persistence fails.
    pub async fn post(&self, author: UserId, text: &str) -> MessageServiceResult<Message> {
        let text = MessageText::new(text)?;
        let draft = NewMessage::new(author, text, &*self.clock);
        let message = self.repository.insert(&draft).await?;
        tracing::info!(message_id = %message.id(), user_id = %author, "message posted");
        Ok(message)
    }

    /// Finds a message by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: MessageId) -> MessageServiceResult<Option<Message>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns a user's messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when lookup fails.
    pub async fn list_for_user(&self, user: UserId) -> MessageServiceResult<Vec<Message>> {
        Ok(self.repository.list_for_user(user).await?)
    }

    /// Counts a user's messages.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when lookup fails.
    pub async fn count_for_user(&self, user: UserId) -> MessageServiceResult<u64> {
        Ok(self.repository.count_for_user(user).await?)
    }

    /// Deletes a message written by `requester`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::NotAuthor`] when `requester` did not
    /// write the message, or [`MessageServiceError::Repository`] when the
    /// message does not exist or persistence fails.
    pub async fn delete(&self, requester: UserId, id: MessageId) -> MessageServiceResult<()> {
        let message = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MessageRepositoryError::NotFound(id))?;

        if message.user_id() != requester {
            tracing::warn!(%requester, message_id = %id, "refused to delete another user's message");
            return Err(MessageServiceError::NotAuthor {
                requester,
                message: id,
            });
        }

        self.repository.delete(id).await?;
        tracing::info!(message_id = %id, user_id = %requester, "message deleted");
        Ok(())
    }
}
