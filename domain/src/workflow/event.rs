//! Inputs to the workflow transition function.

use crate::sentinel::Decision;

/// What the interceptor learned from a qualifying outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTurn {
    /// Literal content of the terminal user turn.
    pub user_content: String,
    /// All turns except the last, rendered as `Role: content` lines.
    pub prior_history: Option<String>,
    /// All turns including the last, with newlines escaped per turn.
    pub full_transcript: String,
}

/// Something observed by one of the three entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// The user enabled search mode.
    Armed,
    /// The user disabled search mode.
    Disarmed,
    /// A qualifying chat request is about to leave the process.
    OutboundRequest(OutboundTurn),
    /// The watcher evaluated a settled reply snapshot.
    DecisionObserved(Decision),
    /// The driver could not put the keyword turn through the host.
    ResubmissionFailed,
    /// The search call of the given round-trip finished and was folded.
    SearchSettled { round_trip: u64 },
    /// The decision timer of the given round-trip expired.
    DecisionTimedOut { round_trip: u64 },
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::Armed => "armed",
            WorkflowEvent::Disarmed => "disarmed",
            WorkflowEvent::OutboundRequest(_) => "outbound_request",
            WorkflowEvent::DecisionObserved(_) => "decision_observed",
            WorkflowEvent::ResubmissionFailed => "resubmission_failed",
            WorkflowEvent::SearchSettled { .. } => "search_settled",
            WorkflowEvent::DecisionTimedOut { .. } => "decision_timed_out",
        }
    }
}
