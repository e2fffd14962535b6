//! Application services for accounts and the follow graph.

mod account;
mod follow;

pub use account::{
    AccountService, AccountServiceError, AccountServiceResult, ProfileUpdate, SignupRequest,
};
pub use follow::{FollowService, FollowServiceError, FollowServiceResult};
