//! Rendering-surface observations.
//!
//! The host reports every change to a rendered reply as a [`Mutation`]
//! carrying the full text snapshot of that element. Observers never see
//! individual characters, only snapshots, so they can re-evaluate from
//! scratch each time.

use crate::request::Role;

/// Identity of one logical reply element on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

/// A change to a rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub element: ElementId,
    /// Who authored the element's content.
    pub author: Role,
    /// Full text of the element after the change.
    pub text: String,
}

impl Mutation {
    pub fn new(element: ElementId, author: Role, text: impl Into<String>) -> Self {
        Self {
            element,
            author,
            text: text.into(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.author == Role::Assistant
    }
}
