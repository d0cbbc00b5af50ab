//! Application-level configuration.
//!
//! - [`WorkflowParams`]: debounce, timeouts and resubmission polling

pub mod workflow_params;

pub use workflow_params::WorkflowParams;
