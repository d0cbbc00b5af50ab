//! User-tunable search request options.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_RESULTS: u32 = 5;
pub const DEFAULT_SUBPAGES: u32 = 2;
pub const DEFAULT_LINKS: u32 = 3;
pub const DEFAULT_IMAGE_LINKS: u32 = 0;

/// Numeric shaping options sent with every search.
///
/// Raw-text inclusion, always-fresh crawling and summaries are always
/// requested; only the counts are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub num_results: u32,
    pub subpages: u32,
    pub links: u32,
    pub image_links: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num_results: DEFAULT_NUM_RESULTS,
            subpages: DEFAULT_SUBPAGES,
            links: DEFAULT_LINKS,
            image_links: DEFAULT_IMAGE_LINKS,
        }
    }
}

/// A single search call: query plus options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub options: SearchOptions,
}

impl SearchRequest {
    /// Build a request, or `None` for a blank query.
    pub fn new(query: &str, options: SearchOptions) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.num_results, 5);
        assert_eq!(options.subpages, 2);
        assert_eq!(options.links, 3);
        assert_eq!(options.image_links, 0);
    }

    #[test]
    fn test_blank_query_is_rejected() {
        assert!(SearchRequest::new("   ", SearchOptions::default()).is_none());
        let request = SearchRequest::new(" rust ", SearchOptions::default()).unwrap();
        assert_eq!(request.query, "rust");
    }
}
