//! Settings store location from TOML (`[settings]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw settings-store configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettingsConfig {
    /// Settings file; defaults to the platform config directory
    pub path: Option<PathBuf>,
}
