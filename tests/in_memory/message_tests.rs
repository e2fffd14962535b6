//! Message tests against the in-memory store.

use crate::in_memory::helpers::{Warbler, app, sign_up};
use rstest::rstest;
use warbler::message::{
    domain::MessageDomainError,
    services::MessageServiceError,
};

#[rstest]
#[tokio::test]
async fn posted_messages_are_counted_and_listed(app: Warbler) {
    let user = sign_up(&app, "testuser").await;

    let first = app.messages.post(user.id(), "first").await.expect("post");
    let second = app.messages.post(user.id(), "second").await.expect("post");

    let listed = app
        .messages
        .list_for_user(user.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&first));
    assert!(listed.contains(&second));
    assert!(listed.windows(2).all(|pair| match pair {
        [newer, older] => newer.timestamp() >= older.timestamp(),
        _ => true,
    }));
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_message_is_rejected(app: Warbler, #[case] text: &str) {
    let user = sign_up(&app, "testuser").await;

    let result = app.messages.post(user.id(), text).await;

    assert!(matches!(
        result,
        Err(MessageServiceError::Domain(MessageDomainError::EmptyText))
    ));
}

#[rstest]
#[tokio::test]
async fn overlong_message_is_rejected(app: Warbler) {
    let user = sign_up(&app, "testuser").await;

    let result = app.messages.post(user.id(), &"w".repeat(141)).await;

    assert!(matches!(
        result,
        Err(MessageServiceError::Domain(MessageDomainError::TextTooLong { actual: 141, .. }))
    ));
    assert_eq!(app.messages.count_for_user(user.id()).await.expect("count"), 0);
}

#[rstest]
#[tokio::test]
async fn deleting_user_removes_messages(app: Warbler) {
    let user = sign_up(&app, "testuser").await;
    let message = app.messages.post(user.id(), "bye").await.expect("post");

    app.accounts.delete(user.id()).await.expect("delete");

    let found = app.messages.find_by_id(message.id()).await.expect("lookup");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn only_author_may_delete(app: Warbler) {
    let author = sign_up(&app, "testuser").await;
    let other = sign_up(&app, "testuser2").await;
    let message = app.messages.post(author.id(), "mine").await.expect("post");

    let refused = app.messages.delete(other.id(), message.id()).await;
    assert!(matches!(refused, Err(MessageServiceError::NotAuthor { .. })));

    app.messages
        .delete(author.id(), message.id())
        .await
        .expect("author delete should succeed");
    assert_eq!(app.messages.count_for_user(author.id()).await.expect("count"), 0);
}
