//! Configuration value objects for the domain layer
//!
//! Keys and validation for the persisted key/value settings.

pub mod setting_key;

pub use setting_key::{SettingKeyInfo, SettingKind, known_settings, lookup_setting, parse_count};
