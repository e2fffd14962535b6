//! Domain model for user-owned messages.

mod error;
mod ids;
mod message;
mod text;

pub use error::MessageDomainError;
pub use ids::MessageId;
pub use message::{Message, NewMessage, PersistedMessageData};
pub use text::{MAX_MESSAGE_LENGTH, MessageText};
