//! Snapshot of one user's position in the follow graph.

use super::{User, UserId};
use std::collections::BTreeSet;

/// Followers and followed users of a single user at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConnections {
    user_id: UserId,
    followers: BTreeSet<UserId>,
    following: BTreeSet<UserId>,
}

impl UserConnections {
    /// Builds a snapshot from the ids on either side of the user.
    #[must_use]
    pub fn new(
        user_id: UserId,
        followers: impl IntoIterator<Item = UserId>,
        following: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            user_id,
            followers: followers.into_iter().collect(),
            following: following.into_iter().collect(),
        }
    }

    /// Returns the user this snapshot describes.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns `true` when this user follows `other`.
    #[must_use]
    pub fn is_following(&self, other: &User) -> bool {
        self.following.contains(&other.id())
    }

    /// Returns `true` when `other` follows this user.
    #[must_use]
    pub fn is_followed_by(&self, other: &User) -> bool {
        self.followers.contains(&other.id())
    }

    /// Returns the ids following this user.
    #[must_use]
    pub const fn followers(&self) -> &BTreeSet<UserId> {
        &self.followers
    }

    /// Returns the ids this user follows.
    #[must_use]
    pub const fn following(&self) -> &BTreeSet<UserId> {
        &self.following
    }

    /// Returns the number of followers.
    #[must_use]
    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    /// Returns the number of followed users.
    #[must_use]
    pub fn following_count(&self) -> usize {
        self.following.len()
    }
}
