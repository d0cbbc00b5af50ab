//! `Role: content` transcript rendering.

use super::chat_request::{ChatRequestBody, ChatTurn};
use crate::workflow::OutboundTurn;

/// How turn content is written into a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newlines {
    /// Content is copied verbatim.
    Keep,
    /// Each `\n` inside a turn becomes the two characters `\` `n`, so every
    /// turn occupies a single line.
    Escape,
}

/// Render turns as `Role: content` lines joined by `\n`.
pub fn render_transcript(turns: &[ChatTurn], newlines: Newlines) -> String {
    turns
        .iter()
        .map(|turn| {
            let content = match newlines {
                Newlines::Keep => turn.content.clone(),
                Newlines::Escape => turn.content.replace('\n', "\\n"),
            };
            format!("{}: {}", turn.role.label(), content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl OutboundTurn {
    /// Capture what the workflow needs from a qualifying request.
    pub fn from_body(body: &ChatRequestBody) -> Self {
        let turns = body.turns();
        let prior_history = match turns.split_last() {
            Some((_, prior)) if !prior.is_empty() => {
                Some(render_transcript(prior, Newlines::Keep))
            }
            _ => None,
        };
        Self {
            user_content: body.last_user_content().to_string(),
            prior_history,
            full_transcript: render_transcript(&turns, Newlines::Escape),
        }
    }
}
