//! Infrastructure layer for search-relay
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod chat;
pub mod config;
pub mod exa;
pub mod settings;
pub mod text;

// Re-export commonly used types
pub use chat::OpenAiChatTransport;
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileSearchConfig,
    FileSettingsConfig, FileWorkflowConfig,
};
pub use exa::{EXA_SEARCH_URL, ExaSearchProvider};
pub use settings::TomlSettingsStore;
pub use text::LatexShorthandTransform;
