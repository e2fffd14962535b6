//! In-memory store implementing every repository port.
//!
//! Users, follow edges, and messages share one lock so that uniqueness,
//! foreign keys, and cascading deletes behave like the `PostgreSQL` schema.
//! Identifiers are assigned from sequences starting at 1; [`InMemoryStore::clear`]
//! empties every table and restarts the sequences.

use crate::message::{
    domain::{Message, MessageId, NewMessage},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use crate::user::{
    domain::{Email, Follow, NewUser, User, UserId, Username},
    ports::{
        FollowRepository, FollowRepositoryError, FollowRepositoryResult, UserRepository,
        UserRepositoryError, UserRepositoryResult,
    },
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Raised when a previous holder of the store lock panicked.
#[derive(Debug, Clone, Copy, Error)]
#[error("in-memory store lock poisoned")]
pub struct StorePoisoned;

/// Thread-safe in-memory store for users, follows, and messages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    follows: HashSet<Follow>,
    messages: BTreeMap<MessageId, Message>,
    next_user_id: i32,
    next_message_id: i32,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            follows: HashSet::new(),
            messages: BTreeMap::new(),
            next_user_id: 1,
            next_message_id: 1,
        }
    }
}

impl StoreState {
    fn users_by_id(&self, ids: impl Iterator<Item = UserId>) -> Vec<User> {
        let mut users: Vec<User> = ids.filter_map(|id| self.users.get(&id).cloned()).collect();
        users.sort_by_key(User::id);
        users
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes every user, follow edge, and message and restarts the id
    /// sequences.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = StoreState::default();
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StorePoisoned> {
        self.state.read().map_err(|_| StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StorePoisoned> {
        self.state.write().map_err(|_| StorePoisoned)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;

        if state.users.values().any(|u| u.username() == user.username()) {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }
        if state.users.values().any(|u| u.email() == user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        let id = UserId::new(state.next_user_id);
        state.next_user_id += 1;
        let stored = user.clone().into_user(id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        let existing = state
            .users
            .get_mut(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?;
        existing.update_profile(user.profile().clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if state.users.remove(&id).is_none() {
            return Err(UserRepositoryError::NotFound(id));
        }
        state.follows.retain(|edge| !edge.involves(id));
        state.messages.retain(|_, message| message.user_id() != id);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state
            .users
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.values().find(|u| u.email() == email).cloned())
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.values().cloned().collect())
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn insert(&self, follow: &Follow) -> FollowRepositoryResult<()> {
        let mut state = self.write().map_err(FollowRepositoryError::persistence)?;

        let both_exist = state.users.contains_key(&follow.user_being_followed_id())
            && state.users.contains_key(&follow.user_following_id());
        if !both_exist {
            return Err(FollowRepositoryError::UnknownUser(*follow));
        }

        if !state.follows.insert(*follow) {
            return Err(FollowRepositoryError::DuplicateFollow(*follow));
        }
        Ok(())
    }

    async fn delete(&self, follow: &Follow) -> FollowRepositoryResult<()> {
        let mut state = self.write().map_err(FollowRepositoryError::persistence)?;
        if !state.follows.remove(follow) {
            return Err(FollowRepositoryError::NotFound(*follow));
        }
        Ok(())
    }

    async fn exists(&self, follow: &Follow) -> FollowRepositoryResult<bool> {
        let state = self.read().map_err(FollowRepositoryError::persistence)?;
        Ok(state.follows.contains(follow))
    }

    async fn followers_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>> {
        let state = self.read().map_err(FollowRepositoryError::persistence)?;
        let ids = state
            .follows
            .iter()
            .filter(|edge| edge.user_being_followed_id() == user)
            .map(Follow::user_following_id);
        Ok(state.users_by_id(ids))
    }

    async fn following_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>> {
        let state = self.read().map_err(FollowRepositoryError::persistence)?;
        let ids = state
            .follows
            .iter()
            .filter(|edge| edge.user_following_id() == user)
            .map(Follow::user_being_followed_id);
        Ok(state.users_by_id(ids))
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn insert(&self, message: &NewMessage) -> MessageRepositoryResult<Message> {
        let mut state = self.write().map_err(MessageRepositoryError::persistence)?;
        if !state.users.contains_key(&message.user_id()) {
            return Err(MessageRepositoryError::UnknownAuthor(message.user_id()));
        }

        let id = MessageId::new(state.next_message_id);
        state.next_message_id += 1;
        let stored = message.clone().into_message(id);
        state.messages.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        let state = self.read().map_err(MessageRepositoryError::persistence)?;
        Ok(state.messages.get(&id).cloned())
    }

    async fn list_for_user(&self, user: UserId) -> MessageRepositoryResult<Vec<Message>> {
        let state = self.read().map_err(MessageRepositoryError::persistence)?;
        let mut messages: Vec<Message> = state
            .messages
            .values()
            .filter(|message| message.user_id() == user)
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(messages)
    }

    async fn count_for_user(&self, user: UserId) -> MessageRepositoryResult<u64> {
        let state = self.read().map_err(MessageRepositoryError::persistence)?;
        let count = state
            .messages
            .values()
            .filter(|message| message.user_id() == user)
            .count();
        u64::try_from(count).map_err(MessageRepositoryError::persistence)
    }

    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()> {
        let mut state = self.write().map_err(MessageRepositoryError::persistence)?;
        if state.messages.remove(&id).is_none() {
            return Err(MessageRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
