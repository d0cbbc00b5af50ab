//! Exa `/search` wire types.

use relay_domain::search::{SearchHit, SearchRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaSearchBody<'a> {
    pub query: &'a str,
    #[serde(rename = "type")]
    pub search_type: &'static str,
    pub num_results: u32,
    pub contents: ExaContents,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaContents {
    pub text: ExaTextOptions,
    pub livecrawl: &'static str,
    /// Always requested; Exa takes an empty object for its defaults.
    pub summary: serde_json::Map<String, serde_json::Value>,
    pub subpages: u32,
    pub extras: ExaExtras,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaTextOptions {
    pub include_html_tags: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaExtras {
    pub links: u32,
    pub image_links: u32,
}

impl<'a> ExaSearchBody<'a> {
    pub fn from_request(request: &'a SearchRequest) -> Self {
        let options = request.options;
        Self {
            query: &request.query,
            search_type: "auto",
            num_results: options.num_results,
            contents: ExaContents {
                text: ExaTextOptions {
                    include_html_tags: false,
                },
                livecrawl: "always",
                summary: serde_json::Map::new(),
                subpages: options.subpages,
                extras: ExaExtras {
                    links: options.links,
                    image_links: options.image_links,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExaSearchResponse {
    #[serde(default)]
    pub results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
pub struct ExaResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub summary: Option<String>,
}

impl From<ExaResult> for SearchHit {
    fn from(result: ExaResult) -> Self {
        SearchHit {
            title: result.title,
            url: result.url,
            text: result.text,
            summary: result.summary,
        }
    }
}
