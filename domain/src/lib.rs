//! Domain layer for search-relay
//!
//! This crate contains the core logic of the search round-trip. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Round-trip
//!
//! One armed-search cycle: decision request → decision reply → keyword
//! resubmission → result-augmented request. Its position is a [`Phase`]
//! held in [`WorkflowState`] and advanced only by [`transition`].
//!
//! ## Sentinels
//!
//! `SEARCH_KEYWORDS:` / `NO_SEARCH_NEEDED:` markers the model is instructed
//! to emit; read by [`parse_decision`].
//!
//! ## Folding
//!
//! Merging flattened [`SearchResults`] into the prompt sent onward to the
//! model, via [`PromptTemplate`].

pub mod config;
pub mod core;
pub mod prompt;
pub mod render;
pub mod request;
pub mod search;
pub mod sentinel;
pub mod session;
pub mod util;
pub mod workflow;

// Re-export commonly used types
pub use config::{SettingKeyInfo, SettingKind, known_settings, lookup_setting, parse_count};
pub use crate::core::error::DomainError;
pub use prompt::{PromptTemplate, RESUBMISSION_MARKER};
pub use render::{ElementId, Mutation};
pub use request::{ChatRequestBody, ChatTurn, Newlines, Role, render_transcript};
pub use search::{SearchHit, SearchOptions, SearchRequest, SearchResults};
pub use sentinel::{Decision, contains_sentinel, parse_decision};
pub use session::StreamEvent;
pub use workflow::{
    Effect, OutboundTurn, PendingSearch, Phase, Transition, TransitionRejected, WorkflowEvent,
    WorkflowState, transition,
};
