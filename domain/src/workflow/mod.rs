//! Search round-trip state machine.
//!
//! State lives in [`WorkflowState`]; the only way to change it is
//! [`transition`], which is pure and returns the [`Effect`]s for the
//! application layer to execute.

pub mod effect;
pub mod event;
pub mod phase;
pub mod state;
pub mod transition;

pub use effect::{Effect, PendingSearch};
pub use event::{OutboundTurn, WorkflowEvent};
pub use phase::Phase;
pub use state::WorkflowState;
pub use transition::{Transition, TransitionRejected, transition};
