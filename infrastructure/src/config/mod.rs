//! Configuration file loading for search-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./search-relay.toml` or `./.search-relay.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/search-relay/config.toml`
//! 4. Environment variables prefixed `SEARCH_RELAY_`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileSearchConfig, FileSettingsConfig,
    FileWorkflowConfig,
};
pub use loader::ConfigLoader;
