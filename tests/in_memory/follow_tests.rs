//! Follow graph tests against the in-memory store.

use crate::in_memory::helpers::{Warbler, app, sign_up};
use rstest::rstest;
use warbler::user::{
    ports::FollowRepositoryError,
    services::{AccountServiceError, FollowServiceError},
};

#[rstest]
#[tokio::test]
async fn is_following(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;

    app.follows
        .follow(user2.id(), user1.id())
        .await
        .expect("follow should succeed");

    assert!(app.follows.is_following(&user2, &user1).await.expect("lookup"));
    assert!(!app.follows.is_following(&user1, &user2).await.expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn is_followed_by(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;

    app.follows
        .follow(user2.id(), user1.id())
        .await
        .expect("follow should succeed");

    assert!(app.follows.is_followed_by(&user1, &user2).await.expect("lookup"));
    assert!(!app.follows.is_followed_by(&user2, &user1).await.expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn connections_reflect_both_directions(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    let user3 = sign_up(&app, "testuser3").await;

    app.follows.follow(user2.id(), user1.id()).await.expect("follow");
    app.follows.follow(user3.id(), user1.id()).await.expect("follow");
    app.follows.follow(user1.id(), user3.id()).await.expect("follow");

    let connections = app
        .follows
        .connections(user1.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(connections.follower_count(), 2);
    assert_eq!(connections.following_count(), 1);
    assert!(connections.is_followed_by(&user2));
    assert!(connections.is_following(&user3));
    assert!(!connections.is_following(&user2));

    let followers = app.follows.followers(user1.id()).await.expect("lookup");
    let names: Vec<&str> = followers.iter().map(|u| u.username().as_str()).collect();
    assert_eq!(names, ["testuser2", "testuser3"]);
}

#[rstest]
#[tokio::test]
async fn duplicate_follow_is_rejected(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    app.follows.follow(user2.id(), user1.id()).await.expect("follow");

    let result = app.follows.follow(user2.id(), user1.id()).await;

    assert!(matches!(
        result,
        Err(FollowServiceError::Repository(FollowRepositoryError::DuplicateFollow(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn unfollow_removes_edge(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    app.follows.follow(user2.id(), user1.id()).await.expect("follow");

    app.follows
        .unfollow(user2.id(), user1.id())
        .await
        .expect("unfollow should succeed");

    assert!(!app.follows.is_following(&user2, &user1).await.expect("lookup"));
    let again = app.follows.unfollow(user2.id(), user1.id()).await;
    assert!(matches!(
        again,
        Err(FollowServiceError::Repository(FollowRepositoryError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn deleting_user_removes_follow_edges(app: Warbler) {
    let user1 = sign_up(&app, "testuser").await;
    let user2 = sign_up(&app, "testuser2").await;
    app.follows.follow(user2.id(), user1.id()).await.expect("follow");
    app.follows.follow(user1.id(), user2.id()).await.expect("follow");

    app.accounts.delete(user2.id()).await.expect("delete");

    let connections = app.follows.connections(user1.id()).await.expect("lookup");
    assert_eq!(connections.follower_count(), 0);
    assert_eq!(connections.following_count(), 0);
    let again = app.accounts.delete(user2.id()).await;
    assert!(matches!(again, Err(AccountServiceError::Repository(_))));
}
