//! User model tests against `PostgreSQL`.

use crate::postgres::helpers::{sign_up, test_database};
use warbler::user::{
    domain::{DEFAULT_IMAGE_URL, UserDomainError},
    ports::{FollowRepositoryError, UserRepositoryError},
    services::{AccountServiceError, FollowServiceError, SignupRequest},
};

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn user_model() {
    let app = test_database().await;

    let user = app
        .accounts
        .signup(SignupRequest::new("testuser", "test@test.com", "HASHED_PASSWORD"))
        .await
        .expect("signup should succeed");

    assert_eq!(app.messages.count_for_user(user.id()).await.expect("count"), 0);
    assert!(app.follows.followers(user.id()).await.expect("lookup").is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn user_repr() {
    let app = test_database().await;

    let user = app
        .accounts
        .signup(SignupRequest::new("testuser", "test@test.com", "HASHED_PASSWORD"))
        .await
        .expect("signup should succeed");

    assert_eq!(user.to_string(), "<User #1: testuser, test@test.com>");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn is_following_and_followed_by() {
    let app = test_database().await;
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;

    app.follows
        .follow(user2.id(), user1.id())
        .await
        .expect("follow should succeed");

    assert!(app.follows.is_following(&user2, &user1).await.expect("lookup"));
    assert!(!app.follows.is_following(&user1, &user2).await.expect("lookup"));
    assert!(app.follows.is_followed_by(&user1, &user2).await.expect("lookup"));
    assert!(!app.follows.is_followed_by(&user2, &user1).await.expect("lookup"));

    let connections = app.follows.connections(user1.id()).await.expect("lookup");
    assert_eq!(connections.follower_count(), 1);
    assert!(connections.is_followed_by(&user2));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn duplicate_and_unknown_follows_are_rejected() {
    let app = test_database().await;
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    app.follows.follow(user2.id(), user1.id()).await.expect("follow");

    let duplicate = app.follows.follow(user2.id(), user1.id()).await;
    assert!(matches!(
        duplicate,
        Err(FollowServiceError::Repository(FollowRepositoryError::DuplicateFollow(_)))
    ));

    app.accounts.delete(user1.id()).await.expect("delete");
    let dangling = app.follows.follow(user2.id(), user1.id()).await;
    assert!(matches!(
        dangling,
        Err(FollowServiceError::Repository(FollowRepositoryError::UnknownUser(_)))
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn user_create() {
    let app = test_database().await;

    let user = app
        .accounts
        .signup(
            SignupRequest::new("username", "email@email.com", "password")
                .with_image_url("http://www.dfgsdfg.com"),
        )
        .await
        .expect("signup should succeed");
    assert_eq!(user.profile().image_url(), "http://www.dfgsdfg.com");

    let defaulted = sign_up(&app, "otheruser").await;
    assert_eq!(defaulted.profile().image_url(), DEFAULT_IMAGE_URL);

    let missing = app
        .accounts
        .signup(SignupRequest::default().with_email("email"))
        .await;
    assert!(matches!(
        missing,
        Err(AccountServiceError::Domain(UserDomainError::MissingField("username")))
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn duplicate_username_and_email_map_to_typed_errors() {
    let app = test_database().await;
    sign_up(&app, "testuser").await;

    let same_name = app
        .accounts
        .signup(SignupRequest::new("testuser", "fresh@test.com", "testpass"))
        .await;
    let same_email = app
        .accounts
        .signup(SignupRequest::new("fresh", "testuser@test.com", "testpass"))
        .await;

    assert!(matches!(
        same_name,
        Err(AccountServiceError::Repository(UserRepositoryError::DuplicateUsername(_)))
    ));
    assert!(matches!(
        same_email,
        Err(AccountServiceError::Repository(UserRepositoryError::DuplicateEmail(_)))
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn user_auth() {
    let app = test_database().await;
    let user = sign_up(&app, "test_user").await;

    let found = app
        .accounts
        .authenticate("test_user", "testpass")
        .await
        .expect("authentication should not error");
    assert_eq!(found, Some(user));

    let wrong_password = app
        .accounts
        .authenticate("test_user", "password")
        .await
        .expect("authentication should not error");
    assert!(wrong_password.is_none());

    let wrong_username = app
        .accounts
        .authenticate("user", "testpass")
        .await
        .expect("authentication should not error");
    assert!(wrong_username.is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn profile_update_round_trips() {
    let app = test_database().await;
    let user = sign_up(&app, "testuser").await;

    let update = warbler::user::services::ProfileUpdate {
        bio: Some("Warbling since 2026".to_owned()),
        location: Some("Lisbon".to_owned()),
        ..Default::default()
    };
    app.accounts
        .update_profile(user.id(), update)
        .await
        .expect("update should succeed");

    let reloaded = app
        .accounts
        .find_by_id(user.id())
        .await
        .expect("lookup should succeed")
        .expect("user exists");
    assert_eq!(reloaded.profile().bio(), Some("Warbling since 2026"));
    assert_eq!(reloaded.profile().location(), Some("Lisbon"));
    assert_eq!(reloaded.profile().image_url(), DEFAULT_IMAGE_URL);
}
