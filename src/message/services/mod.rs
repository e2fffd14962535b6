//! Application services for messages.

mod messages;

pub use messages::{MessageService, MessageServiceError, MessageServiceResult};
