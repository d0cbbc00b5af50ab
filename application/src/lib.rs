//! Application layer for search-relay
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod timing;
pub mod use_cases;
pub mod workflow;

// Re-export commonly used types
pub use config::WorkflowParams;
pub use ports::{
    chat_transport::{ChatTransport, StreamHandle, TransportError},
    host_surface::{ComposerId, HostSurface, InputNotification, SubmitControl},
    render_observer::{NoRenderObserver, RenderObserver},
    search_provider::{SearchError, SearchProvider},
    settings_store::{InMemorySettingsStore, SettingsError, SettingsStore},
    text_transform::{IdentityTransform, TextTransform},
    ui_surface::UiSurface,
};
pub use timing::{BoundedRetry, Debouncer, RetryOutcome};
pub use use_cases::{
    DecisionEvaluator, KeywordResubmitter, OutboundInterceptor, ResponseWatcher, SettingView,
    SettingsUseCase, SettingsUseCaseError, ToggleOutcome, ToggleSearchUseCase, WebSearchUseCase,
};
pub use workflow::SearchWorkflow;
