//! Sentinel protocol riding on free-form model output.
//!
//! The decision prompt instructs the model to start its reply with either
//! `SEARCH_KEYWORDS: [..]` or `NO_SEARCH_NEEDED: <answer>`. These functions
//! recognize those markers in a settled reply snapshot. Pure text matching,
//! no I/O.

mod extract;

pub use extract::{
    Decision, NO_SEARCH_MARKER, SEARCH_KEYWORDS_MARKER, contains_sentinel, parse_decision,
};
