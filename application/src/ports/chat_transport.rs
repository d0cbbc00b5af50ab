//! Chat transport port
//!
//! The host application's outgoing-request path. A transport takes a raw
//! request body and yields the streamed reply. The outbound interceptor is
//! itself a [`ChatTransport`] that wraps the host's own.

use async_trait::async_trait;
use relay_domain::StreamEvent;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while sending a chat request
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Chat API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed chat response: {0}")]
    InvalidResponse(String),
}

/// Handle for receiving streaming events from a chat reply.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A handle that yields a single `Completed` event.
    pub fn completed(text: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity is 1 and nothing else was sent, so this cannot fail
        let _ = tx.try_send(StreamEvent::Completed(text.into()));
        Self::new(rx)
    }
}

/// Outgoing chat request path
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a raw JSON request body and stream the reply.
    async fn send(&self, body: String) -> Result<StreamHandle, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_handle_yields_one_event_then_closes() {
        let mut handle = StreamHandle::completed("done");
        assert_eq!(
            handle.receiver.recv().await,
            Some(StreamEvent::Completed("done".to_string()))
        );
        assert_eq!(handle.receiver.recv().await, None);
    }
}
