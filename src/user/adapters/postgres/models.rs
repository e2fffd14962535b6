//! Diesel row models for user and follow persistence.

use super::schema::{follows, users};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Database-assigned identifier.
    pub id: i32,
    /// Unique email address.
    pub email: String,
    /// Unique username.
    pub username: String,
    /// Avatar URL.
    pub image_url: String,
    /// Header image URL.
    pub header_image_url: String,
    /// Biography.
    pub bio: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Password hash.
    pub password: String,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Unique email address.
    pub email: String,
    /// Unique username.
    pub username: String,
    /// Avatar URL.
    pub image_url: String,
    /// Header image URL.
    pub header_image_url: String,
    /// Biography.
    pub bio: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Password hash.
    pub password: String,
}

/// Changeset for profile updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChangeset {
    /// Avatar URL.
    pub image_url: String,
    /// Header image URL.
    pub header_image_url: String,
    /// Biography.
    pub bio: Option<String>,
    /// Location.
    pub location: Option<String>,
}

/// Insert model for follow edges.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = follows)]
pub struct FollowRow {
    /// The followed user.
    pub user_being_followed_id: i32,
    /// The follower.
    pub user_following_id: i32,
}
