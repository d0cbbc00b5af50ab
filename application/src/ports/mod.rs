//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod chat_transport;
pub mod host_surface;
pub mod render_observer;
pub mod search_provider;
pub mod settings_store;
pub mod text_transform;
pub mod ui_surface;
