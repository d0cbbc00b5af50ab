//! Prompt domain
//!
//! Templates for the turns rewritten or synthesized during a search round-trip.

mod template;

pub use template::{PromptTemplate, RESUBMISSION_MARKER};
