//! Message tests against `PostgreSQL`.

use crate::postgres::helpers::{sign_up, test_database};
use warbler::database;
use warbler::message::{ports::MessageRepositoryError, services::MessageServiceError};
use warbler::user::domain::UserId;

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn messages_persist_newest_first() {
    let app = test_database().await;
    let user = sign_up(&app, "testuser").await;

    for text in ["one", "two", "three"] {
        app.messages.post(user.id(), text).await.expect("post");
    }

    let listed = app
        .messages
        .list_for_user(user.id())
        .await
        .expect("listing should succeed");
    let texts: Vec<&str> = listed.iter().map(|m| m.text().as_str()).collect();
    assert_eq!(texts, ["three", "two", "one"]);
    assert_eq!(app.messages.count_for_user(user.id()).await.expect("count"), 3);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn message_for_unknown_author_is_rejected() {
    let app = test_database().await;

    let result = app.messages.post(UserId::new(404), "hello").await;

    assert!(matches!(
        result,
        Err(MessageServiceError::Repository(MessageRepositoryError::UnknownAuthor(_)))
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn deleting_user_cascades_to_messages_and_follows() {
    let app = test_database().await;
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    let message = app.messages.post(user2.id(), "bye").await.expect("post");
    app.follows.follow(user2.id(), user1.id()).await.expect("follow");

    app.accounts.delete(user2.id()).await.expect("delete");

    assert!(app.messages.find_by_id(message.id()).await.expect("lookup").is_none());
    assert!(app.follows.followers(user1.id()).await.expect("lookup").is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL server; run with --ignored"]
async fn reset_restarts_identifiers() {
    let app = test_database().await;
    sign_up(&app, "first").await;
    sign_up(&app, "second").await;

    let pool = app.pool.clone();
    tokio::task::spawn_blocking(move || database::reset_tables(&pool))
        .await
        .expect("reset task should not panic")
        .expect("reset should succeed");

    let user = sign_up(&app, "third").await;
    assert_eq!(user.id(), UserId::new(1));
}
