//! Port contracts for message persistence.

pub mod repository;

pub use repository::{MessageRepository, MessageRepositoryError, MessageRepositoryResult};
