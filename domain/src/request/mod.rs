//! Outgoing chat request model.

pub mod chat_request;
pub mod role;
pub mod transcript;

pub use chat_request::{ChatRequestBody, ChatTurn, MESSAGES_FIELD};
pub use role::Role;
pub use transcript::{Newlines, render_transcript};
