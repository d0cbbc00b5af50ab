//! Presentation layer for search-relay
//!
//! This crate contains the CLI definition, the terminal chat host, the
//! search slash commands and the console UI surface.

pub mod cli;
pub mod host;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use host::{ChatHost, CommandExtension, HostCommand, TerminalSurface};
pub use search::SearchCommands;
pub use ui::ConsoleUi;
