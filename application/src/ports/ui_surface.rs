//! UI surface port
//!
//! The small set of UI signals the workflow emits. Widget creation and
//! styling belong to the adapter.

/// UI collaborator driven by the workflow.
pub trait UiSurface: Send + Sync {
    /// Ask the user for a search credential.
    ///
    /// Adapters show the prompt at most once until a credential is saved.
    fn show_credential_prompt(&self);

    /// Turn the loading indicator on or off. Idempotent.
    fn set_loading(&self, loading: bool);

    /// Reflect whether search mode is armed.
    fn render_toggle(&self, armed: bool);
}
