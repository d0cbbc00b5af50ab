//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("API key cannot be empty")]
    EmptyCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_display() {
        let error = DomainError::InvalidSetting {
            key: "exa_links".to_string(),
            reason: "'x' is not a non-negative integer".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for exa_links: 'x' is not a non-negative integer"
        );
    }

    #[test]
    fn test_empty_credential_display() {
        assert_eq!(DomainError::EmptyCredential.to_string(), "API key cannot be empty");
    }
}
