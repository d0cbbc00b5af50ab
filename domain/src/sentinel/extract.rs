use serde::{Deserialize, Serialize};

/// Marker preceding the comma-separated search keywords.
pub const SEARCH_KEYWORDS_MARKER: &str = "SEARCH_KEYWORDS:";

/// Marker preceding a direct answer that needs no search.
pub const NO_SEARCH_MARKER: &str = "NO_SEARCH_NEEDED:";

/// The model's decision as read from its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Search with these keywords (never empty once produced by [`parse_decision`]).
    Search(String),
    /// The model answered directly.
    NoSearch,
    /// The keyword marker was present but nothing usable followed it.
    Invalid,
}

/// Whether the text contains either sentinel.
pub fn contains_sentinel(text: &str) -> bool {
    text.contains(SEARCH_KEYWORDS_MARKER) || text.contains(NO_SEARCH_MARKER)
}

/// Read a decision from a reply snapshot.
///
/// `SEARCH_KEYWORDS:` takes precedence over `NO_SEARCH_NEEDED:`. After the
/// keyword marker, a bracketed list yields the text between the first `[`
/// and the last `]`; otherwise the rest of the line is used. A trailing
/// `NO_SEARCH_NEEDED:` inside the extracted text cuts it short.
///
/// Returns `None` when neither sentinel is present.
///
/// # Examples
///
/// ```
/// use relay_domain::sentinel::{Decision, parse_decision};
///
/// assert_eq!(
///     parse_decision("SEARCH_KEYWORDS: [web browsers, market share 2024]"),
///     Some(Decision::Search("web browsers, market share 2024".to_string()))
/// );
/// assert_eq!(parse_decision("SEARCH_KEYWORDS: []"), Some(Decision::Invalid));
/// assert_eq!(parse_decision("NO_SEARCH_NEEDED: 42"), Some(Decision::NoSearch));
/// assert_eq!(parse_decision("just chatting"), None);
/// ```
pub fn parse_decision(text: &str) -> Option<Decision> {
    let text = text.trim();

    if let Some(start) = text.find(SEARCH_KEYWORDS_MARKER) {
        let after = text[start + SEARCH_KEYWORDS_MARKER.len()..].trim();
        let decision = match extract_keywords(after) {
            Some(keywords) => {
                let keywords = match keywords.find(NO_SEARCH_MARKER) {
                    Some(cut) => keywords[..cut].trim(),
                    None => keywords,
                };
                if keywords.is_empty() {
                    Decision::Invalid
                } else {
                    Decision::Search(keywords.to_string())
                }
            }
            None => Decision::Invalid,
        };
        return Some(decision);
    }

    if text.contains(NO_SEARCH_MARKER) {
        return Some(Decision::NoSearch);
    }

    None
}

fn extract_keywords(after: &str) -> Option<&str> {
    if after.starts_with('[') {
        let close = after.rfind(']')?;
        let inner = after[1..close].trim();
        return (!inner.is_empty()).then_some(inner);
    }

    let line = after.lines().next().unwrap_or("").trim();
    (!line.is_empty()).then_some(line)
}
