//! `PostgreSQL` repository implementation for users and follow edges.

use super::{
    models::{FollowRow, NewUserRow, ProfileChangeset, UserRow},
    schema::{follows, users},
};
use crate::database::{PgPool, run_blocking};
use crate::user::{
    domain::{
        Email, Follow, NewUser, PasswordHash, PersistedUserData, Profile, User, UserDomainError,
        UserId, Username,
    },
    ports::{
        FollowRepository, FollowRepositoryError, FollowRepositoryResult, UserRepository,
        UserRepositoryError, UserRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// `PostgreSQL`-backed user and follow repository.
///
/// Every operation checks a connection out of the pool inside
/// [`tokio::task::spawn_blocking`] so Diesel never blocks the runtime.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let new_row = to_new_row(user);
        let username = user.username().clone();
        let email = user.email().clone();

        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(USERNAME_CONSTRAINT) =>
                    {
                        UserRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(EMAIL_CONSTRAINT) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            row_to_user(row).map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let profile = user.profile();
        let changes = ProfileChangeset {
            image_url: profile.image_url().to_owned(),
            header_image_url: profile.header_image_url().to_owned(),
            bio: profile.bio().map(str::to_owned),
            location: profile.location().map(str::to_owned),
        };

        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.value())))
                .set(&changes)
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.value())))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let row = users::table
                .filter(users::id.eq(id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user)
                .transpose()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let username_str = username.as_str().to_owned();
        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let row = users::table
                .filter(users::username.eq(&username_str))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user)
                .transpose()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let email_str = email.as_str().to_owned();
        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let row = users::table
                .filter(users::email.eq(&email_str))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user)
                .transpose()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, UserRepositoryError::from_boxed, move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .order(users::id.asc())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter()
                .map(row_to_user)
                .collect::<Result<_, _>>()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }
}

#[async_trait]
impl FollowRepository for PostgresUserRepository {
    async fn insert(&self, follow: &Follow) -> FollowRepositoryResult<()> {
        let edge = *follow;
        run_blocking(&self.pool, FollowRepositoryError::from_boxed, move |connection| {
            diesel::insert_into(follows::table)
                .values(&to_follow_row(&edge))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FollowRepositoryError::DuplicateFollow(edge)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        FollowRepositoryError::UnknownUser(edge)
                    }
                    _ => FollowRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, follow: &Follow) -> FollowRepositoryResult<()> {
        let edge = *follow;
        run_blocking(&self.pool, FollowRepositoryError::from_boxed, move |connection| {
            let deleted = diesel::delete(follows::table.find(edge_key(&edge)))
                .execute(connection)
                .map_err(FollowRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(FollowRepositoryError::NotFound(edge));
            }
            Ok(())
        })
        .await
    }

    async fn exists(&self, follow: &Follow) -> FollowRepositoryResult<bool> {
        let edge = *follow;
        run_blocking(&self.pool, FollowRepositoryError::from_boxed, move |connection| {
            diesel::select(diesel::dsl::exists(follows::table.find(edge_key(&edge))))
                .get_result::<bool>(connection)
                .map_err(FollowRepositoryError::persistence)
        })
        .await
    }

    async fn followers_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, FollowRepositoryError::from_boxed, move |connection| {
            let rows = users::table
                .inner_join(follows::table.on(follows::user_following_id.eq(users::id)))
                .filter(follows::user_being_followed_id.eq(user.value()))
                .select(UserRow::as_select())
                .order(users::id.asc())
                .load::<UserRow>(connection)
                .map_err(FollowRepositoryError::persistence)?;
            rows_to_users(rows)
        })
        .await
    }

    async fn following_of(&self, user: UserId) -> FollowRepositoryResult<Vec<User>> {
        run_blocking(&self.pool, FollowRepositoryError::from_boxed, move |connection| {
            let rows = users::table
                .inner_join(follows::table.on(follows::user_being_followed_id.eq(users::id)))
                .filter(follows::user_following_id.eq(user.value()))
                .select(UserRow::as_select())
                .order(users::id.asc())
                .load::<UserRow>(connection)
                .map_err(FollowRepositoryError::persistence)?;
            rows_to_users(rows)
        })
        .await
    }
}

const fn edge_key(edge: &Follow) -> (i32, i32) {
    (
        edge.user_being_followed_id().value(),
        edge.user_following_id().value(),
    )
}

fn rows_to_users(rows: Vec<UserRow>) -> FollowRepositoryResult<Vec<User>> {
    rows.into_iter()
        .map(row_to_user)
        .collect::<Result<_, _>>()
        .map_err(FollowRepositoryError::invalid_persisted_data)
}

fn to_new_row(user: &NewUser) -> NewUserRow {
    let profile = user.profile();
    NewUserRow {
        email: user.email().as_str().to_owned(),
        username: user.username().as_str().to_owned(),
        image_url: profile.image_url().to_owned(),
        header_image_url: profile.header_image_url().to_owned(),
        bio: profile.bio().map(str::to_owned),
        location: profile.location().map(str::to_owned),
        password: user.password().as_str().to_owned(),
    }
}

const fn to_follow_row(follow: &Follow) -> FollowRow {
    FollowRow {
        user_being_followed_id: follow.user_being_followed_id().value(),
        user_following_id: follow.user_following_id().value(),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserDomainError> {
    let UserRow {
        id,
        email,
        username,
        image_url,
        header_image_url,
        bio,
        location,
        password,
    } = row;

    let profile = Profile::default()
        .with_image_url(Some(image_url.as_str()))
        .with_header_image_url(Some(header_image_url.as_str()))
        .with_bio(bio.as_deref())
        .with_location(location.as_deref());

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::new(id),
        username: Username::new(username)?,
        email: Email::new(email)?,
        password: PasswordHash::from_stored(password),
        profile,
    }))
}
