//! Search-mode controls for the terminal host

pub mod commands;

pub use commands::{SearchCommand, SearchCommands};
