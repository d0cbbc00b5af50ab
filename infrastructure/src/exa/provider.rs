//! Exa search provider.

use super::types::{ExaSearchBody, ExaSearchResponse};
use async_trait::async_trait;
use relay_application::ports::search_provider::{SearchError, SearchProvider};
use relay_domain::search::{SearchHit, SearchRequest, SearchResults};
use relay_domain::util::truncate_str;
use tracing::debug;

/// Exa `/search` endpoint.
pub const EXA_SEARCH_URL: &str = "https://api.exa.ai/search";

/// [`SearchProvider`] backed by the Exa `/search` API.
#[derive(Debug, Clone)]
pub struct ExaSearchProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl ExaSearchProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: EXA_SEARCH_URL.to_string(),
        }
    }

    /// Point at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchProvider for ExaSearchProvider {
    fn name(&self) -> &str {
        "exa"
    }

    async fn search(
        &self,
        api_key: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingCredential);
        }

        let body = ExaSearchBody::from_request(request);
        debug!(
            num_results = body.num_results,
            subpages = body.contents.subpages,
            "POST {}",
            self.endpoint
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: truncate_str(&body, 500).to_string(),
            });
        }

        let parsed: ExaSearchResponse = resp
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        Ok(SearchResults::new(
            parsed.results.into_iter().map(SearchHit::from).collect(),
        ))
    }
}
