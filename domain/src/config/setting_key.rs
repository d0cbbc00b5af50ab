//! Registry of persisted settings.
//!
//! Every value the key/value settings store holds is listed here with its
//! default, so lookups and validation share one source of truth.

use crate::core::error::DomainError;

/// What kind of value a setting holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// A credential. Never echoed back in listings.
    Secret,
    /// A non-negative integer.
    Count,
    /// `true` / `false`.
    Flag,
}

/// Metadata for a single setting.
#[derive(Debug, Clone)]
pub struct SettingKeyInfo {
    /// Storage key (e.g. `"exa_num_results"`).
    pub key: &'static str,
    /// Short name used by the `/set` command (e.g. `"results"`).
    pub alias: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    pub kind: SettingKind,
    /// Default rendered as a string; empty for secrets.
    pub default: &'static str,
}

pub const EXA_API_KEY: &str = "exa_api_key";
pub const EXA_NUM_RESULTS: &str = "exa_num_results";
pub const EXA_SUBPAGES: &str = "exa_subpages";
pub const EXA_LINKS: &str = "exa_links";
pub const EXA_IMAGE_LINKS: &str = "exa_image_links";
pub const DEBUG: &str = "debug";

/// All known settings.
pub fn known_settings() -> &'static [SettingKeyInfo] {
    &KNOWN_SETTINGS
}

/// Look up a setting by storage key or by `/set` alias.
pub fn lookup_setting(name: &str) -> Option<&'static SettingKeyInfo> {
    KNOWN_SETTINGS
        .iter()
        .find(|s| s.key == name || s.alias == name)
}

/// Parse a user-supplied count, accepting only non-negative integers.
pub fn parse_count(key: &str, raw: &str) -> Result<u32, DomainError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidSetting {
            key: key.to_string(),
            reason: format!("'{}' is not a non-negative integer", raw.trim()),
        })
}

// Defaults are duplicated as literals because `static` initializers cannot
// call `to_string`; `test_count_defaults_match_search_options` keeps them aligned.
static KNOWN_SETTINGS: [SettingKeyInfo; 6] = [
    SettingKeyInfo {
        key: EXA_API_KEY,
        alias: "key",
        description: "Exa API key used for web search",
        kind: SettingKind::Secret,
        default: "",
    },
    SettingKeyInfo {
        key: EXA_NUM_RESULTS,
        alias: "results",
        description: "Number of search results",
        kind: SettingKind::Count,
        default: "5",
    },
    SettingKeyInfo {
        key: EXA_SUBPAGES,
        alias: "subpages",
        description: "Sub-pages crawled per result",
        kind: SettingKind::Count,
        default: "2",
    },
    SettingKeyInfo {
        key: EXA_LINKS,
        alias: "links",
        description: "Links extracted per result",
        kind: SettingKind::Count,
        default: "3",
    },
    SettingKeyInfo {
        key: EXA_IMAGE_LINKS,
        alias: "image-links",
        description: "Image links extracted per result",
        kind: SettingKind::Count,
        default: "0",
    },
    SettingKeyInfo {
        key: DEBUG,
        alias: "debug",
        description: "Verbose logging when no -v flag is given",
        kind: SettingKind::Flag,
        default: "false",
    },
];
