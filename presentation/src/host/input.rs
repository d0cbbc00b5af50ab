//! Line input for the terminal host.
//!
//! rustyline blocks, so the editor lives on its own thread and hands lines
//! to the async loop over a channel. A line is read only when the host asks
//! for one, which keeps the prompt from appearing while a reply prints.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const PROMPT: &str = ">>> ";

/// What the editor produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D, or the editor failed.
    Eof,
}

/// Default history file: `<data dir>/search-relay/history.txt`.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("search-relay").join("history.txt"))
}

/// Async handle over a line editor running on a dedicated thread.
pub struct LineReader {
    requests: Option<std_mpsc::Sender<()>>,
    events: mpsc::UnboundedReceiver<InputEvent>,
    reading: bool,
}

impl LineReader {
    /// Start the editor thread, loading history from `history_path`.
    ///
    /// A plain thread rather than a blocking task: a pending `readline`
    /// must not hold up runtime shutdown.
    pub fn spawn(history_path: Option<PathBuf>) -> rustyline::Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = editor.load_history(path);
        }

        let (request_tx, request_rx) = std_mpsc::channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("line-editor".to_string())
            .spawn(move || read_lines(editor, history_path, request_rx, event_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            events: event_rx,
            reading: false,
        })
    }

    /// Ask for the next line unless one is already being read.
    pub fn request(&mut self) {
        if self.reading {
            return;
        }
        if let Some(requests) = &self.requests {
            self.reading = requests.send(()).is_ok();
        }
    }

    /// Next event from the editor. `None` once the editor thread is gone.
    pub async fn next(&mut self) -> Option<InputEvent> {
        let event = self.events.recv().await;
        self.reading = false;
        event
    }

    /// Reader replaying fixed events, with no editor behind it.
    #[cfg(test)]
    pub(crate) fn scripted(events: Vec<InputEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            let _ = tx.send(event);
        }
        Self {
            requests: None,
            events: rx,
            reading: false,
        }
    }
}

fn read_lines(
    mut editor: DefaultEditor,
    history_path: Option<PathBuf>,
    requests: std_mpsc::Receiver<()>,
    events: mpsc::UnboundedSender<InputEvent>,
) {
    while requests.recv().is_ok() {
        let event = match editor.readline(PROMPT) {
            Ok(line) => {
                let entry = line.trim();
                // Slash commands are not worth recalling.
                if !entry.is_empty() && !entry.starts_with('/') {
                    let _ = editor.add_history_entry(entry);
                    if let Some(ref path) = history_path
                        && let Err(e) = editor.save_history(path)
                    {
                        debug!("Could not save history to {}: {}", path.display(), e);
                    }
                }
                InputEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
            Err(ReadlineError::Eof) => InputEvent::Eof,
            Err(err) => {
                warn!("Line editor failed: {:?}", err);
                InputEvent::Eof
            }
        };

        let done = event == InputEvent::Eof;
        if events.send(event).is_err() || done {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_reader_replays_then_ends() {
        let mut reader = LineReader::scripted(vec![
            InputEvent::Line("hello".to_string()),
            InputEvent::Interrupted,
        ]);

        reader.request();
        assert!(!reader.reading);
        assert_eq!(reader.next().await, Some(InputEvent::Line("hello".to_string())));
        assert_eq!(reader.next().await, Some(InputEvent::Interrupted));
        assert_eq!(reader.next().await, None);
    }

    #[test]
    fn test_default_history_path_is_under_app_dir() {
        if let Some(path) = default_history_path() {
            assert!(path.ends_with("search-relay/history.txt"));
        }
    }
}
