//! Chat backend adapters

mod openai_transport;
mod sse;

pub use openai_transport::OpenAiChatTransport;
pub use sse::{SseLine, parse_sse_line};
