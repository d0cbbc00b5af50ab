//! Search provider port
//!
//! Defines how the application reaches an external web-search API. The
//! adapter issues exactly one request per call and never retries.

use async_trait::async_trait;
use relay_domain::{SearchRequest, SearchResults};
use thiserror::Error;

/// Reasons a search produced no usable text.
///
/// The web search use case folds every variant into "no results"; the
/// variants exist so the cause can be logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query is empty")]
    InvalidQuery,

    #[error("Search API key is not set")]
    MissingCredential,

    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Search returned no results")]
    NoResults,

    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("Search request timed out")]
    Timeout,
}

/// Port for a web-search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name for logs (e.g. `"exa"`).
    fn name(&self) -> &str;

    /// Run a single search.
    async fn search(
        &self,
        api_key: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, SearchError>;
}
