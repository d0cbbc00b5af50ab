//! OpenAI-compatible chat transport.
//!
//! Posts the host's request body unchanged and turns the reply into
//! [`StreamEvent`]s. Streaming (`text/event-stream`) and plain JSON replies
//! are both accepted.

use super::sse::{SseLine, drain_lines, parse_completion, parse_sse_line};
use async_trait::async_trait;
use futures::StreamExt;
use relay_application::ports::chat_transport::{ChatTransport, StreamHandle, TransportError};
use relay_domain::session::StreamEvent;
use relay_domain::util::truncate_str;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

const CHANNEL_CAPACITY: usize = 100;

/// [`ChatTransport`] for `/v1/chat/completions`-style endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiChatTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiChatTransport {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl ChatTransport for OpenAiChatTransport {
    async fn send(&self, body: String) -> Result<StreamHandle, TransportError> {
        debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(key) = &self.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", key));
        }

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate_str(&body, 500).to_string(),
            });
        }

        let streaming = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"));

        if !streaming {
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError::ConnectionError(e.to_string()))?;
            let text = parse_completion(&body).map_err(TransportError::InvalidResponse)?;
            return Ok(StreamHandle::completed(text));
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump_sse(resp, tx));
        Ok(StreamHandle::new(rx))
    }
}

async fn pump_sse(resp: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut stream = resp.bytes_stream();
    let mut buffer = Vec::new();
    let mut full = String::new();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                error!("Chat stream failed: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };
        buffer.extend_from_slice(&chunk);

        for line in drain_lines(&mut buffer) {
            match parse_sse_line(&line) {
                SseLine::Delta(text) => {
                    full.push_str(&text);
                    if tx.send(StreamEvent::Delta(text)).await.is_err() {
                        debug!("Stream receiver dropped");
                        return;
                    }
                }
                SseLine::Done => {
                    let _ = tx.send(StreamEvent::Completed(full)).await;
                    return;
                }
                SseLine::Malformed(e) => warn!("Skipping malformed stream chunk: {}", e),
                SseLine::Ignored => {}
            }
        }
    }

    // Some servers close without [DONE].
    let _ = tx.send(StreamEvent::Completed(full)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let transport =
            OpenAiChatTransport::new(reqwest::Client::new(), "http://127.0.0.1:1/v1/chat/completions");
        let result = transport.send("{}".to_string()).await;
        assert!(matches!(result, Err(TransportError::ConnectionError(_))));
    }
}
