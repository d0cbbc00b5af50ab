//! Search results and their flattened text form.

use serde::{Deserialize, Serialize};

/// Separator line written after every flattened result.
pub const RESULT_DELIMITER: &str = "---";

/// One result returned by the provider. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
    pub summary: Option<String>,
}

/// Ordered results of one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Flatten into a single text block for folding into a prompt.
    ///
    /// Each result contributes `Title:`, `URL:`, `Text:` and `Summary:` lines
    /// for the fields it has (empty fields are skipped), followed by `---`.
    /// The whole block is trimmed.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for hit in &self.hits {
            let fields = [
                ("Title", &hit.title),
                ("URL", &hit.url),
                ("Text", &hit.text),
                ("Summary", &hit.summary),
            ];
            for (label, value) in fields {
                if let Some(value) = value
                    && !value.is_empty()
                {
                    out.push_str(&format!("{}: {}\n", label, value));
                }
            }
            out.push_str(RESULT_DELIMITER);
            out.push('\n');
        }
        out.trim().to_string()
    }
}
