//! Use cases for the search round-trip.
//!
//! | Use case | Entry point |
//! |----------|-------------|
//! | [`OutboundInterceptor`] | outgoing chat request |
//! | [`ResponseWatcher`] | rendered reply mutation |
//! | [`KeywordResubmitter`] | `Search` decision |
//! | [`WebSearchUseCase`] | results fold |
//! | [`ToggleSearchUseCase`] | user toggle |
//! | [`SettingsUseCase`] | settings commands |

pub mod intercept_request;
pub mod manage_settings;
pub mod resubmit_keywords;
pub mod toggle_search;
pub mod watch_response;
pub mod web_search;

pub use intercept_request::OutboundInterceptor;
pub use manage_settings::{SettingView, SettingsUseCase, SettingsUseCaseError};
pub use resubmit_keywords::{KeywordResubmitter, ResubmitFailure, ResubmitOutcome};
pub use toggle_search::{ToggleOutcome, ToggleSearchUseCase};
pub use watch_response::{DecisionEvaluator, ResponseWatcher};
pub use web_search::WebSearchUseCase;
