//! Streaming reply rendering.
//!
//! [`ReplyRenderer`] accumulates one reply element. Every chunk produces a
//! [`Mutation`] with the full snapshot for the render observer, and the
//! terminal gets whole lines only, each passed through the text transform.

use relay_application::ports::render_observer::RenderObserver;
use relay_application::ports::text_transform::TextTransform;
use relay_domain::render::{ElementId, Mutation};
use relay_domain::request::Role;

pub struct ReplyRenderer<'a> {
    element: ElementId,
    text: String,
    pending_line: String,
    observer: &'a dyn RenderObserver,
    transform: &'a dyn TextTransform,
}

impl<'a> ReplyRenderer<'a> {
    pub fn new(
        element: ElementId,
        observer: &'a dyn RenderObserver,
        transform: &'a dyn TextTransform,
    ) -> Self {
        Self {
            element,
            text: String::new(),
            pending_line: String::new(),
            observer,
            transform,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a chunk and return the lines it completed, ready to print.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }
        self.text.push_str(chunk);
        self.observer
            .on_mutation(&Mutation::new(self.element, Role::Assistant, self.text.clone()));

        self.pending_line.push_str(chunk);
        let mut lines = Vec::new();
        while let Some(end) = self.pending_line.find('\n') {
            let line: String = self.pending_line.drain(..=end).collect();
            lines.push(self.transform.apply(line.trim_end_matches(['\n', '\r'])));
        }
        lines
    }

    /// Finish the element: the unterminated last line (if any) and the full
    /// raw text.
    pub fn finish(self) -> (Option<String>, String) {
        let tail = (!self.pending_line.is_empty()).then(|| self.transform.apply(&self.pending_line));
        (tail, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Mutation>>);

    impl RenderObserver for Recorder {
        fn on_mutation(&self, mutation: &Mutation) {
            self.0.lock().unwrap().push(mutation.clone());
        }
    }

    struct Shout;

    impl TextTransform for Shout {
        fn apply(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_chunks_emit_full_snapshots() {
        let recorder = Recorder::default();
        let mut renderer = ReplyRenderer::new(ElementId(3), &recorder, &Shout);

        renderer.push("SEARCH_");
        renderer.push("KEYWORDS: [a]");

        let seen = recorder.0.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].text, "SEARCH_KEYWORDS: [a]");
        assert_eq!(seen[1].element, ElementId(3));
        assert!(seen[1].is_assistant());
    }

    #[test]
    fn test_lines_are_buffered_and_transformed() {
        let recorder = Recorder::default();
        let mut renderer = ReplyRenderer::new(ElementId(1), &recorder, &Shout);

        assert!(renderer.push("hel").is_empty());
        assert_eq!(renderer.push("lo\nwor"), vec!["HELLO".to_string()]);
        assert_eq!(renderer.push("ld\r\n\n"), vec!["WORLD".to_string(), String::new()]);
        let (tail, text) = renderer.finish();
        assert!(tail.is_none());
        assert_eq!(text, "hello\nworld\r\n\n");
    }

    #[test]
    fn test_finish_flushes_tail() {
        let recorder = Recorder::default();
        let mut renderer = ReplyRenderer::new(ElementId(1), &recorder, &Shout);
        renderer.push("no newline");

        let (tail, _) = renderer.finish();
        assert_eq!(tail.as_deref(), Some("NO NEWLINE"));
    }
}
