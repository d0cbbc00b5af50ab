//! Server-sent event line handling for OpenAI-compatible streams.

use serde::Deserialize;

/// What a single `data:` line carried.
#[derive(Debug, PartialEq, Eq)]
pub enum SseLine {
    /// A content fragment.
    Delta(String),
    /// `data: [DONE]`.
    Done,
    /// Blank lines, comments, role-only chunks and other noise.
    Ignored,
    /// A `data:` payload that is not a valid chunk.
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Classify one line of an SSE body.
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    let Some(data) = line.strip_prefix("data:") else {
        return SseLine::Ignored;
    };
    let data = data.trim_start();
    if data == "[DONE]" {
        return SseLine::Done;
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            let content: String = chunk
                .choices
                .into_iter()
                .filter_map(|c| c.delta.content)
                .collect();
            if content.is_empty() {
                SseLine::Ignored
            } else {
                SseLine::Delta(content)
            }
        }
        Err(e) => SseLine::Malformed(e.to_string()),
    }
}

/// Extract the reply text from a non-streaming completion body.
pub fn parse_completion(body: &str) -> Result<String, String> {
    let completion: Completion = serde_json::from_str(body).map_err(|e| e.to_string())?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| "completion has no message content".to_string())
}

/// Split buffered bytes into complete lines, keeping any trailing partial
/// line in `buffer`. Multi-byte characters split across network chunks stay
/// in the buffer until their line is complete.
pub fn drain_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(end) = buffer.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=end).collect();
        let line = String::from_utf8_lossy(&line[..end]);
        lines.push(line.trim_end_matches('\r').to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_delta() {
        let line = r#"data: {"choices":[{"index":0,"delta":{"content":"Hel"}}]}"#;
        assert_eq!(parse_sse_line(line), SseLine::Delta("Hel".to_string()));
    }

    #[test]
    fn test_parse_done_and_noise() {
        assert_eq!(parse_sse_line("data: [DONE]"), SseLine::Done);
        assert_eq!(parse_sse_line(""), SseLine::Ignored);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Ignored);
        assert_eq!(
            parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            SseLine::Ignored
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_sse_line("data: {nope"), SseLine::Malformed(_)));
    }

    #[test]
    fn test_drain_lines_keeps_partial_tail() {
        let mut buffer = b"data: a\r\ndata: b\ndata: par".to_vec();
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines, vec!["data: a".to_string(), "data: b".to_string()]);
        assert_eq!(buffer, b"data: par");
    }

    #[test]
    fn test_drain_lines_waits_for_split_character() {
        let degree = "data: 25\u{b0}C\n".as_bytes();
        let split = degree.len() - 3;
        let mut buffer = degree[..split].to_vec();
        assert!(drain_lines(&mut buffer).is_empty());

        buffer.extend_from_slice(&degree[split..]);
        assert_eq!(drain_lines(&mut buffer), vec!["data: 25\u{b0}C".to_string()]);
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hi"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hi");
        assert!(parse_completion(r#"{"choices":[]}"#).is_err());
    }
}
