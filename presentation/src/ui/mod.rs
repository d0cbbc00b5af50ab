//! Terminal UI surfaces

pub mod console_ui;

pub use console_ui::ConsoleUi;
