//! Web Search use case.
//!
//! Runs one search for a keyword string and returns the flattened,
//! readability-transformed result text, or nothing. Every failure mode
//! (blank keywords, missing credential, HTTP error, malformed body, empty
//! result set, timeout) collapses to `None` for the caller; the reason is
//! logged.

use crate::ports::search_provider::{SearchError, SearchProvider};
use crate::ports::settings_store::SettingsStore;
use crate::ports::text_transform::{IdentityTransform, TextTransform};
use crate::ports::ui_surface::UiSurface;
use crate::use_cases::manage_settings::SettingsUseCase;
use relay_domain::config::setting_key::EXA_API_KEY;
use relay_domain::search::SearchRequest;
use relay_domain::util::log_preview;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Use case for a single keyword search.
#[derive(Clone)]
pub struct WebSearchUseCase {
    provider: Arc<dyn SearchProvider>,
    settings: Arc<dyn SettingsStore>,
    ui: Arc<dyn UiSurface>,
    transform: Arc<dyn TextTransform>,
    timeout: Duration,
}

impl WebSearchUseCase {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        settings: Arc<dyn SettingsStore>,
        ui: Arc<dyn UiSurface>,
    ) -> Self {
        Self {
            provider,
            settings,
            ui,
            transform: Arc::new(IdentityTransform),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_transform(mut self, transform: Arc<dyn TextTransform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search for `keywords`. `None` on any failure.
    pub async fn execute(&self, keywords: &str) -> Option<String> {
        match self.try_execute(keywords).await {
            Ok(text) => Some(text),
            Err(SearchError::MissingCredential) => {
                warn!("Search skipped: no API key configured");
                None
            }
            Err(e) => {
                warn!("Search via {} failed: {}", self.provider.name(), e);
                None
            }
        }
    }

    /// Search for `keywords`, keeping the failure reason.
    pub async fn try_execute(&self, keywords: &str) -> Result<String, SearchError> {
        let options = SettingsUseCase::new(Arc::clone(&self.settings)).search_options();
        let request = SearchRequest::new(keywords, options).ok_or(SearchError::InvalidQuery)?;

        let Some(api_key) = self.settings.get_non_empty(EXA_API_KEY) else {
            self.ui.show_credential_prompt();
            return Err(SearchError::MissingCredential);
        };

        info!(
            "Searching {} for: {}",
            self.provider.name(),
            log_preview(&request.query, 100)
        );

        let results = tokio::time::timeout(
            self.timeout,
            self.provider.search(api_key.trim(), &request),
        )
        .await
        .map_err(|_| SearchError::Timeout)??;

        if results.is_empty() {
            return Err(SearchError::NoResults);
        }

        info!("Search returned {} result(s)", results.len());
        Ok(self.transform.apply(&results.flatten()))
    }
}
