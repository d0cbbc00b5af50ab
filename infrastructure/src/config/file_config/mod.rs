//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types at the
//! edge.

mod chat;
mod search;
mod settings;
mod workflow;

pub use chat::FileChatConfig;
pub use search::FileSearchConfig;
pub use settings::FileSettingsConfig;
pub use workflow::FileWorkflowConfig;

use relay_application::WorkflowParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("{0} cannot be empty")]
    EmptyValue(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat backend used by the terminal host
    pub chat: FileChatConfig,
    /// Search provider
    pub search: FileSearchConfig,
    /// Round-trip timing
    pub workflow: FileWorkflowConfig,
    /// Settings store location
    pub settings: FileSettingsConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let non_empty = [
            ("chat.endpoint", &self.chat.endpoint),
            ("chat.model", &self.chat.model),
            ("search.endpoint", &self.search.endpoint),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyValue(field));
            }
        }

        let non_zero = [
            ("search.timeout_seconds", self.search.timeout_seconds),
            (
                "workflow.decision_timeout_seconds",
                self.workflow.decision_timeout_seconds,
            ),
            ("workflow.debounce_ms", self.workflow.debounce_ms),
            ("workflow.submit_interval_ms", self.workflow.submit_interval_ms),
            (
                "workflow.submit_attempts",
                u64::from(self.workflow.submit_attempts),
            ),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigValidationError::ZeroValue(field));
            }
        }

        Ok(())
    }

    /// Timing parameters for the workflow use cases.
    pub fn workflow_params(&self) -> WorkflowParams {
        self.workflow.to_params(self.search.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[chat]
endpoint = "http://localhost:8080/v1/chat/completions"
model = "local-model"
api_key_env = "LOCAL_KEY"

[search]
endpoint = "http://localhost:9000/search"
timeout_seconds = 10

[workflow]
debounce_ms = 500
decision_timeout_seconds = 30
submit_attempts = 10
submit_interval_ms = 100
submit_initial_delay_ms = 50

[settings]
path = "/tmp/relay-settings.toml"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.model, "local-model");
        assert_eq!(config.search.timeout_seconds, 10);
        assert_eq!(config.workflow.submit_attempts, 10);
        assert_eq!(
            config.settings.path.as_deref(),
            Some(std::path::Path::new("/tmp/relay-settings.toml"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[workflow]
debounce_ms = 300
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workflow.debounce_ms, 300);
        // Defaults should apply
        assert_eq!(config.workflow.submit_attempts, 25);
        assert_eq!(config.search.endpoint, "https://api.exa.ai/search");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[search]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("search.timeout_seconds"))
        );
    }

    #[test]
    fn test_validate_zero_attempts() {
        let mut config = FileConfig::default();
        config.workflow.submit_attempts = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroValue("workflow.submit_attempts"))
        );
    }

    #[test]
    fn test_validate_empty_endpoint() {
        let toml_str = r#"
[chat]
endpoint = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyValue("chat.endpoint"))
        );
    }

    #[test]
    fn test_workflow_params_conversion() {
        let mut config = FileConfig::default();
        config.search.timeout_seconds = 15;
        config.workflow.debounce_ms = 200;

        let params = config.workflow_params();
        assert_eq!(params.search_timeout, Duration::from_secs(15));
        assert_eq!(params.debounce, Duration::from_millis(200));
        assert_eq!(params.decision_timeout, Some(Duration::from_secs(120)));
        assert_eq!(params.submit_initial_delay, Duration::from_millis(150));
    }
}
