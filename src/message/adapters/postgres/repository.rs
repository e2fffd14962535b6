//! `PostgreSQL` repository implementation for messages.

use super::{
    models::{MessageRow, NewMessageRow},
    schema::messages,
};
use crate::database::{PgPool, run_blocking};
use crate::message::{
    domain::{Message, MessageDomainError, MessageId, MessageText, NewMessage, PersistedMessageData},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed message repository.
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn insert(&self, message: &NewMessage) -> MessageRepositoryResult<Message> {
        let author = message.user_id();
        let new_row = NewMessageRow {
            text: message.text().as_str().to_owned(),
            timestamp: message.timestamp(),
            user_id: author.value(),
        };

        run_blocking(&self.pool, MessageRepositoryError::from_boxed, move |connection| {
            let row = diesel::insert_into(messages::table)
                .values(&new_row)
                .returning(MessageRow::as_returning())
                .get_result::<MessageRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        MessageRepositoryError::UnknownAuthor(author)
                    }
                    _ => MessageRepositoryError::persistence(err),
                })?;
            row_to_message(row).map_err(MessageRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        run_blocking(&self.pool, MessageRepositoryError::from_boxed, move |connection| {
            let row = messages::table
                .filter(messages::id.eq(id.value()))
                .select(MessageRow::as_select())
                .first::<MessageRow>(connection)
                .optional()
                .map_err(MessageRepositoryError::persistence)?;
            row.map(row_to_message)
                .transpose()
                .map_err(MessageRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn list_for_user(&self, user: UserId) -> MessageRepositoryResult<Vec<Message>> {
        run_blocking(&self.pool, MessageRepositoryError::from_boxed, move |connection| {
            let rows = messages::table
                .filter(messages::user_id.eq(user.value()))
                .select(MessageRow::as_select())
                .order((messages::timestamp.desc(), messages::id.desc()))
                .load::<MessageRow>(connection)
                .map_err(MessageRepositoryError::persistence)?;
            rows.into_iter()
                .map(row_to_message)
                .collect::<Result<_, _>>()
                .map_err(MessageRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn count_for_user(&self, user: UserId) -> MessageRepositoryResult<u64> {
        run_blocking(&self.pool, MessageRepositoryError::from_boxed, move |connection| {
            let count = messages::table
                .filter(messages::user_id.eq(user.value()))
                .count()
                .get_result::<i64>(connection)
                .map_err(MessageRepositoryError::persistence)?;
            u64::try_from(count).map_err(MessageRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()> {
        run_blocking(&self.pool, MessageRepositoryError::from_boxed, move |connection| {
            let deleted = diesel::delete(messages::table.filter(messages::id.eq(id.value())))
                .execute(connection)
                .map_err(MessageRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(MessageRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_message(row: MessageRow) -> Result<Message, MessageDomainError> {
    let MessageRow {
        id,
        text,
        timestamp,
        user_id,
    } = row;

    Ok(Message::from_persisted(PersistedMessageData {
        id: MessageId::new(id),
        user_id: UserId::new(user_id),
        text: MessageText::new(text)?,
        timestamp,
    }))
}
