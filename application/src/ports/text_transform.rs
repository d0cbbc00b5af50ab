//! Text transform port
//!
//! A readability pass applied to search results before folding and to
//! rendered replies.

/// Pure text-to-text normalization.
pub trait TextTransform: Send + Sync {
    fn apply(&self, text: &str) -> String;
}

/// Transform that returns its input unchanged
pub struct IdentityTransform;

impl TextTransform for IdentityTransform {
    fn apply(&self, text: &str) -> String {
        text.to_string()
    }
}
