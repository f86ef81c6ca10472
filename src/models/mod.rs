//! Data model types: messages, the message log, and the request body.

mod log;
mod message;
mod request;

pub use log::MessageLog;
pub use message::{Message, Role};
pub use request::ChatRequest;
