//! Workflow state record.

use super::phase::Phase;
use serde::{Deserialize, Serialize};

/// The single mutable record shared by the interceptor, the response watcher
/// and the resubmission driver.
///
/// Invariants (checked by [`WorkflowState::is_consistent`]):
/// - `pending_keywords` is `Some` iff `phase == AwaitingResults`
/// - `original_query` is `Some` whenever `phase != Idle`
/// - `prior_history` is `None` while `Idle`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// User has enabled search augmentation.
    pub armed: bool,
    /// Current position within the round-trip.
    pub phase: Phase,
    /// The user's literal last turn, kept until the results are folded.
    pub original_query: Option<String>,
    /// Transcript excluding the last turn, captured on `Idle -> AwaitingDecision`.
    pub prior_history: Option<String>,
    /// Keywords chosen by the model; only set while awaiting results.
    pub pending_keywords: Option<String>,
    /// Monotonic counter, bumped each time a round-trip starts.
    ///
    /// Timers and late completions carry the value they were created under,
    /// so a callback belonging to an earlier round-trip can be recognized
    /// and dropped.
    pub round_trip: u64,
}

impl WorkflowState {
    /// Fresh state with the given arming.
    pub fn new(armed: bool) -> Self {
        Self {
            armed,
            ..Default::default()
        }
    }

    /// Return to `Idle`, dropping all round-trip data. Arming and the
    /// round-trip counter are kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.original_query = None;
        self.prior_history = None;
        self.pending_keywords = None;
    }

    /// Whether the record satisfies the phase invariants.
    pub fn is_consistent(&self) -> bool {
        let keywords_ok = self.pending_keywords.is_some() == (self.phase == Phase::AwaitingResults);
        let query_ok = self.phase == Phase::Idle || self.original_query.is_some();
        let history_ok = self.phase != Phase::Idle || self.prior_history.is_none();
        keywords_ok && query_ok && history_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle_and_consistent() {
        let state = WorkflowState::new(true);
        assert!(state.armed);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_reset_keeps_arming_and_counter() {
        let mut state = WorkflowState {
            armed: true,
            phase: Phase::AwaitingResults,
            original_query: Some("q".to_string()),
            prior_history: Some("User: hi".to_string()),
            pending_keywords: Some("k".to_string()),
            round_trip: 4,
        };
        assert!(state.is_consistent());

        state.reset();
        assert!(state.armed);
        assert_eq!(state.round_trip, 4);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.original_query.is_none());
        assert!(state.pending_keywords.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_keywords_outside_results_phase_is_inconsistent() {
        let state = WorkflowState {
            phase: Phase::AwaitingDecision,
            original_query: Some("q".to_string()),
            pending_keywords: Some("k".to_string()),
            ..Default::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_in_flight_without_query_is_inconsistent() {
        let state = WorkflowState {
            phase: Phase::AwaitingDecision,
            ..Default::default()
        };
        assert!(!state.is_consistent());
    }
}
