//! The message aggregate.

use super::{MessageId, MessageText};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// A message that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    user_id: UserId,
    text: MessageText,
    timestamp: DateTime<Utc>,
}

impl NewMessage {
    /// Creates an unsaved message stamped with the current clock time.
    #[must_use]
    pub fn new(user_id: UserId, text: MessageText, clock: &impl Clock) -> Self {
        Self {
            user_id,
            text,
            timestamp: clock.utc(),
        }
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the body.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            user_id: self.user_id,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted identifier.
    pub id: MessageId,
    /// Persisted author.
    pub user_id: UserId,
    /// Persisted body.
    pub text: MessageText,
    /// Persisted creation time.
    pub timestamp: DateTime<Utc>,
}

/// A stored message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    user_id: UserId,
    text: MessageText,
    timestamp: DateTime<Utc>,
}

impl Message {
    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            text: data.text,
            timestamp: data.timestamp,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the body.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Message #{} by user #{}>", self.id, self.user_id)
    }
}
