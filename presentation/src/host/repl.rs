//! REPL (Read-Eval-Print Loop) for the terminal chat host

use super::extension::{CommandExtension, CommandOutcome, NoExtension, split_command};
use super::input::{InputEvent, LineReader, default_history_path};
use super::render::ReplyRenderer;
use super::surface::{HostCommand, TerminalSurface};
use crate::ui::ConsoleUi;
use relay_application::ports::chat_transport::ChatTransport;
use relay_application::ports::render_observer::{NoRenderObserver, RenderObserver};
use relay_application::ports::text_transform::{IdentityTransform, TextTransform};
use relay_domain::render::{ElementId, Mutation};
use relay_domain::request::{ChatTurn, Role};
use relay_domain::session::StreamEvent;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Interactive chat host
pub struct ChatHost {
    transport: Arc<dyn ChatTransport>,
    surface: Arc<TerminalSurface>,
    commands: mpsc::UnboundedReceiver<HostCommand>,
    ui: Arc<ConsoleUi>,
    observer: Arc<dyn RenderObserver>,
    transform: Arc<dyn TextTransform>,
    extension: Arc<dyn CommandExtension>,
    model: String,
    history: Vec<ChatTurn>,
    next_element: u64,
}

impl ChatHost {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        surface: Arc<TerminalSurface>,
        commands: mpsc::UnboundedReceiver<HostCommand>,
        ui: Arc<ConsoleUi>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            surface,
            commands,
            ui,
            observer: Arc::new(NoRenderObserver),
            transform: Arc::new(IdentityTransform),
            extension: Arc::new(NoExtension),
            model: model.into(),
            history: Vec::new(),
            next_element: 0,
        }
    }

    /// Observer notified of every change to a rendered turn.
    pub fn with_observer(mut self, observer: Arc<dyn RenderObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Transform applied to rendered assistant lines.
    pub fn with_transform(mut self, transform: Arc<dyn TextTransform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_extension(mut self, extension: Arc<dyn CommandExtension>) -> Self {
        self.extension = extension;
        self
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Run the interactive loop until `/quit`, EOF or Ctrl-C.
    ///
    /// Input goes through a rustyline editor with history kept under the
    /// user's data directory.
    pub async fn run(&mut self) -> rustyline::Result<()> {
        let input = LineReader::spawn(default_history_path())?;
        self.run_with(input).await;
        Ok(())
    }

    async fn run_with(&mut self, mut input: LineReader) {
        self.print_welcome();

        loop {
            input.request();
            tokio::select! {
                event = input.next() => {
                    match event {
                        Some(InputEvent::Line(line)) => {
                            if self.handle_line(&line) {
                                break;
                            }
                        }
                        Some(InputEvent::Interrupted) => println!("^C"),
                        Some(InputEvent::Eof) | None => {
                            println!("Bye!");
                            break;
                        }
                    }
                }
                Some(command) = self.commands.recv() => {
                    self.handle_command(command).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    println!("Bye!");
                    break;
                }
            }
        }
    }

    /// Returns true if the host should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        if let Some((name, args)) = split_command(line) {
            return self.handle_slash(name, args);
        }

        if !self.surface.type_and_send(line) {
            self.ui.error("A reply is still streaming, try again when it finishes");
        }
        false
    }

    fn handle_slash(&mut self, name: &str, args: &str) -> bool {
        match name {
            "quit" | "exit" | "q" => {
                println!("Bye!");
                true
            }
            "help" | "h" | "?" => {
                self.print_help();
                false
            }
            "clear" => {
                self.history.clear();
                self.ui.info("Conversation cleared");
                false
            }
            _ => {
                if self.extension.handle(name, args) == CommandOutcome::Unknown {
                    println!("Unknown command: /{}", name);
                    println!("Type /help for available commands");
                }
                false
            }
        }
    }

    async fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::Submit { text, typed } => {
                if !typed {
                    self.ui.echo_user_turn(&text);
                }
                self.send_turn(text).await;
                self.surface.set_streaming(false);
            }
        }
    }

    fn next_element(&mut self) -> ElementId {
        self.next_element += 1;
        ElementId(self.next_element)
    }

    fn request_body(&self) -> String {
        let messages: Vec<_> = self
            .history
            .iter()
            .map(|turn| json!({ "role": turn.role.as_str(), "content": turn.content }))
            .collect();
        json!({
            "model": self.model,
            "stream": true,
            "messages": messages,
        })
        .to_string()
    }

    async fn send_turn(&mut self, text: String) {
        let user_element = self.next_element();
        self.observer
            .on_mutation(&Mutation::new(user_element, Role::User, text.clone()));
        self.history.push(ChatTurn::new(Role::User, text));

        let mut handle = match self.transport.send(self.request_body()).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.ui.error(&format!("Chat request failed: {}", e));
                self.history.pop();
                return;
            }
        };

        let element = self.next_element();
        let mut renderer = ReplyRenderer::new(element, self.observer.as_ref(), self.transform.as_ref());
        let mut failed = false;

        while let Some(event) = handle.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    for line in renderer.push(&chunk) {
                        self.ui.print_line(&line);
                    }
                }
                StreamEvent::Completed(full) => {
                    if renderer.is_empty() {
                        for line in renderer.push(&full) {
                            self.ui.print_line(&line);
                        }
                    }
                    break;
                }
                StreamEvent::Error(e) => {
                    self.ui.error(&format!("Stream error: {}", e));
                    failed = true;
                    break;
                }
            }
        }

        let (tail, reply) = renderer.finish();
        if let Some(tail) = tail {
            self.ui.print_line(&tail);
        }
        if reply.is_empty() {
            debug!("Empty reply{}", if failed { " after stream error" } else { "" });
            return;
        }
        self.history.push(ChatTurn::new(Role::Assistant, reply));
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             search-relay - Chat             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.model);
        println!("Type /help for commands");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  {:<20} - Show this help", "/help, /h, /?");
        println!("  {:<20} - Forget the conversation", "/clear");
        println!("  {:<20} - Exit chat", "/quit, /exit, /q");
        for (usage, description) in self.extension.help() {
            println!("  {:<20} - {}", usage, description);
        }
        println!();
    }
}
