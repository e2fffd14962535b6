//! User model tests against the in-memory store.

use crate::in_memory::helpers::{Warbler, app, sign_up};
use rstest::rstest;
use warbler::user::{
    domain::{DEFAULT_IMAGE_URL, UserDomainError},
    ports::UserRepositoryError,
    services::{AccountServiceError, SignupRequest},
};

#[rstest]
#[tokio::test]
async fn new_user_has_no_messages_or_followers(app: Warbler) {
    let user = sign_up(&app, "testuser").await;

    let messages = app
        .messages
        .count_for_user(user.id())
        .await
        .expect("count should succeed");
    let followers = app
        .follows
        .followers(user.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(messages, 0);
    assert!(followers.is_empty());
}

#[rstest]
#[tokio::test]
async fn first_user_repr(app: Warbler) {
    let user = app
        .accounts
        .signup(SignupRequest::new("testuser", "test@test.com", "HASHED_PASSWORD"))
        .await
        .expect("signup should succeed");

    assert_eq!(user.to_string(), "<User #1: testuser, test@test.com>");
}

#[rstest]
#[tokio::test]
async fn clear_restarts_identifiers(app: Warbler) {
    sign_up(&app, "first").await;
    sign_up(&app, "second").await;

    app.store.clear();
    let user = sign_up(&app, "third").await;

    assert_eq!(user.id().value(), 1);
}

#[rstest]
#[tokio::test]
async fn signup_with_all_fields(app: Warbler) {
    let user = app
        .accounts
        .signup(
            SignupRequest::new("username", "email@email.com", "password")
                .with_image_url("http://www.dfgsdfg.com"),
        )
        .await
        .expect("signup should succeed");

    assert_eq!(user.username().as_str(), "username");
    assert_eq!(user.email().as_str(), "email@email.com");
    assert_ne!(user.password().as_str(), "password");
    assert_eq!(user.profile().image_url(), "http://www.dfgsdfg.com");
}

#[rstest]
#[tokio::test]
async fn signup_without_image_uses_default_avatar(app: Warbler) {
    let user = sign_up(&app, "username").await;

    assert_eq!(user.profile().image_url(), DEFAULT_IMAGE_URL);
}

#[rstest]
#[tokio::test]
async fn signup_missing_fields_fails(app: Warbler) {
    let result = app
        .accounts
        .signup(SignupRequest::default().with_email("email"))
        .await;

    assert!(matches!(
        result,
        Err(AccountServiceError::Domain(UserDomainError::MissingField("username")))
    ));
    let users = app.accounts.list_all().await.expect("listing");
    assert!(users.is_empty());
}

#[rstest]
#[tokio::test]
async fn signup_rejects_taken_username_and_email(app: Warbler) {
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

#[rstest]
#[tokio::test]
async fn authenticate_with_correct_credentials(app: Warbler) {
    let user = sign_up(&app, "test_user").await;

    let found = app
        .accounts
        .authenticate("test_user", "testpass")
        .await
        .expect("authentication should not error");

    assert_eq!(found, Some(user));
}

#[rstest]
#[case("test_user", "password")]
#[case("user", "testpass")]
#[tokio::test]
async fn authenticate_with_wrong_credentials(
    app: Warbler,
    #[case] username: &str,
    #[case] password: &str,
) {
    sign_up(&app, "test_user").await;

    let found = app
        .accounts
        .authenticate(username, password)
        .await
        .expect("authentication should not error");

    assert!(found.is_none());
}
