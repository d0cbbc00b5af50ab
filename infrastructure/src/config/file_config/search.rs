//! Search provider configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.exa.ai/search";

/// Raw search configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Exa `/search` URL
    pub endpoint: String,
    /// Upper bound on a single search call
    pub timeout_seconds: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileSearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
