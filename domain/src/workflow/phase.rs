//! Round-trip phases.

use serde::{Deserialize, Serialize};

/// Position of the workflow within one armed-search round-trip.
///
/// The only legal order within a round-trip is
/// `Idle -> AwaitingDecision -> AwaitingResults -> Idle`; every failure
/// branch jumps straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No round-trip in flight.
    #[default]
    Idle,
    /// The decision prompt was sent; waiting for the model to emit a sentinel.
    AwaitingDecision,
    /// Keywords were extracted; waiting for the resubmitted turn to come back
    /// through the interceptor so the search can be folded in.
    AwaitingResults,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingDecision => "awaiting_decision",
            Phase::AwaitingResults => "awaiting_results",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Idle => "Idle",
            Phase::AwaitingDecision => "Awaiting Decision",
            Phase::AwaitingResults => "Awaiting Results",
        }
    }

    /// Whether a round-trip is in flight.
    pub fn is_in_flight(&self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
