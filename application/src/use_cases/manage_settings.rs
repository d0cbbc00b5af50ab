//! Manage Settings use case.
//!
//! Credential entry and reset, numeric search options and the debug flag.
//! Every value goes through the [`SettingsStore`] port and is validated
//! against the registry in [`relay_domain::config`].

use crate::ports::settings_store::{SettingsError, SettingsStore};
use relay_domain::DomainError;
use relay_domain::config::setting_key::{
    DEBUG, EXA_API_KEY, EXA_IMAGE_LINKS, EXA_LINKS, EXA_NUM_RESULTS, EXA_SUBPAGES,
};
use relay_domain::config::{SettingKind, known_settings, lookup_setting, parse_count};
use relay_domain::search::SearchOptions;
use relay_domain::search::options::{
    DEFAULT_IMAGE_LINKS, DEFAULT_LINKS, DEFAULT_NUM_RESULTS, DEFAULT_SUBPAGES,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const MASK: &str = "********";

#[derive(Error, Debug)]
pub enum SettingsUseCaseError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] SettingsError),
}

/// One row of the `/options` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingView {
    pub key: &'static str,
    pub alias: &'static str,
    pub description: &'static str,
    /// Current value, masked for secrets, `None` when unset.
    pub value: Option<String>,
    pub default: &'static str,
}

/// Use case for reading and changing persisted settings.
#[derive(Clone)]
pub struct SettingsUseCase {
    store: Arc<dyn SettingsStore>,
}

impl SettingsUseCase {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub fn has_api_key(&self) -> bool {
        self.store.get_non_empty(EXA_API_KEY).is_some()
    }

    /// Save the search credential. Surrounding whitespace is dropped.
    pub fn set_api_key(&self, raw: &str) -> Result<(), SettingsUseCaseError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(DomainError::EmptyCredential.into());
        }
        self.store.set(EXA_API_KEY, key)?;
        info!("Search API key saved");
        Ok(())
    }

    /// Forget the search credential.
    pub fn reset_api_key(&self) -> Result<(), SettingsUseCaseError> {
        self.store.remove(EXA_API_KEY)?;
        info!("Search API key removed");
        Ok(())
    }

    /// Set a numeric option by storage key or alias.
    ///
    /// Only [`SettingKind::Count`] settings are accepted here; the
    /// credential and the debug flag have their own operations.
    pub fn set_option(&self, name: &str, raw: &str) -> Result<u32, SettingsUseCaseError> {
        let info = lookup_setting(name)
            .ok_or_else(|| DomainError::UnknownSetting(name.to_string()))?;
        if info.kind != SettingKind::Count {
            return Err(DomainError::InvalidSetting {
                key: info.key.to_string(),
                reason: "not a numeric option".to_string(),
            }
            .into());
        }
        let value = parse_count(info.key, raw)?;
        self.store.set(info.key, &value.to_string())?;
        info!("Setting {} = {}", info.key, value);
        Ok(value)
    }

    /// Flip the debug flag and return the new value.
    pub fn toggle_debug(&self) -> Result<bool, SettingsUseCaseError> {
        let enabled = !self.debug_enabled();
        self.store.set(DEBUG, if enabled { "true" } else { "false" })?;
        info!("Debug logging {}", if enabled { "enabled" } else { "disabled" });
        Ok(enabled)
    }

    pub fn debug_enabled(&self) -> bool {
        self.store.get_flag(DEBUG, false)
    }

    /// Current search options, defaults filled in.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            num_results: self.store.get_count(EXA_NUM_RESULTS, DEFAULT_NUM_RESULTS),
            subpages: self.store.get_count(EXA_SUBPAGES, DEFAULT_SUBPAGES),
            links: self.store.get_count(EXA_LINKS, DEFAULT_LINKS),
            image_links: self.store.get_count(EXA_IMAGE_LINKS, DEFAULT_IMAGE_LINKS),
        }
    }

    /// Every known setting with its current value.
    pub fn options(&self) -> Vec<SettingView> {
        known_settings()
            .iter()
            .map(|info| {
                let value = self.store.get_non_empty(info.key).map(|v| match info.kind {
                    SettingKind::Secret => MASK.to_string(),
                    _ => v,
                });
                SettingView {
                    key: info.key,
                    alias: info.alias,
                    description: info.description,
                    value,
                    default: info.default,
                }
            })
            .collect()
    }
}
