//! Timer-driven primitives shared by the use cases.
//!
//! - [`BoundedRetry`]: fixed-interval polling with a one-shot fallback
//! - [`Debouncer`]: trailing-edge, single-slot-per-key debounce

pub mod debounce;
pub mod retry;

pub use debounce::Debouncer;
pub use retry::{BoundedRetry, RetryOutcome};
