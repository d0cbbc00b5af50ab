//! Streaming events for chat transport communication.
//!
//! A transport turns the reply into a sequence of [`StreamEvent`]s: zero or
//! more deltas, then exactly one `Completed` or `Error`.

/// An event in a streaming chat reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete reply text (signals stream end).
    Completed(String),
    /// The stream failed; no further events follow.
    Error(String),
}
