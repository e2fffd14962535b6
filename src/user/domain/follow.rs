//! Directed follow edge.

use super::{UserDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Records that `user_following_id` follows `user_being_followed_id`.
///
/// Edges are directed: the reverse edge is a distinct record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follow {
    user_being_followed_id: UserId,
    user_following_id: UserId,
}

impl Follow {
    /// Creates an edge meaning "`user_following_id` follows
    /// `user_being_followed_id`".
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::SelfFollow`] when both ids are equal.
    pub fn new(
        user_being_followed_id: UserId,
        user_following_id: UserId,
    ) -> Result<Self, UserDomainError> {
        if user_being_followed_id == user_following_id {
            return Err(UserDomainError::SelfFollow(user_following_id));
        }
        Ok(Self {
            user_being_followed_id,
            user_following_id,
        })
    }

    /// Returns the followed user.
    #[must_use]
    pub const fn user_being_followed_id(&self) -> UserId {
        self.user_being_followed_id
    }

    /// Returns the follower.
    #[must_use]
    pub const fn user_following_id(&self) -> UserId {
        self.user_following_id
    }

    /// Returns `true` when the edge mentions `user` on either end.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.user_being_followed_id == user || self.user_following_id == user
    }
}

impl fmt::Display for Follow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.user_following_id, self.user_being_followed_id
        )
    }
}
