//! Diesel row models for message persistence.

use super::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Database-assigned identifier.
    pub id: i32,
    /// Message body.
    pub text: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Author.
    pub user_id: i32,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message body.
    pub text: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Author.
    pub user_id: i32,
}
