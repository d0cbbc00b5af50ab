//! Exa web-search adapter
//!
//! [`ExaSearchProvider`] implements the application's
//! [`SearchProvider`](relay_application::SearchProvider) port against
//! `POST https://api.exa.ai/search` with bearer authentication.

mod provider;
mod types;

pub use provider::{EXA_SEARCH_URL, ExaSearchProvider};
