//! Side effects requested by a transition.
//!
//! The transition function never performs I/O. It returns these values and a
//! thin adapter in the application layer executes them.

/// Everything needed to run the search and fold its result, captured at the
/// moment the round-trip left `AwaitingResults`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub keywords: String,
    pub original_query: String,
    pub prior_history: Option<String>,
    pub round_trip: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Turn the loading indicator on or off.
    SetLoading(bool),
    /// Replace the terminal user turn of the request in flight.
    RewriteLastTurn(String),
    /// Start the decision timer for the given round-trip.
    ArmDecisionTimeout { round_trip: u64 },
    /// Hand the keywords to the resubmission driver.
    SubmitKeywords(String),
    /// Call the search provider and fold the outcome into the request.
    RunSearch(PendingSearch),
}
