//! Pure state transitions: `(state, event) -> (state', effects)`.

use super::effect::{Effect, PendingSearch};
use super::event::{OutboundTurn, WorkflowEvent};
use super::phase::Phase;
use super::state::WorkflowState;
use crate::prompt::PromptTemplate;
use crate::sentinel::Decision;
use thiserror::Error;

/// Result of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: WorkflowState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

/// An event that does not fit the current state. The caller discards it;
/// the state is never repaired speculatively.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionRejected {
    #[error("{event} is only valid in {expected}, current phase is {actual}")]
    PhaseMismatch {
        event: &'static str,
        expected: Phase,
        actual: Phase,
    },

    #[error("{event} belongs to round-trip {stale}, current round-trip is {current}")]
    StaleRoundTrip {
        event: &'static str,
        stale: u64,
        current: u64,
    },
}

/// Compute the next state and the effects to run for `event`.
pub fn transition(
    state: &WorkflowState,
    event: WorkflowEvent,
) -> Result<Transition, TransitionRejected> {
    let name = event.name();
    match event {
        WorkflowEvent::Armed => {
            let mut next = state.clone();
            next.armed = true;
            next.reset();
            Ok(Transition::new(next, Vec::new()))
        }
        WorkflowEvent::Disarmed => {
            let mut next = state.clone();
            next.armed = false;
            next.reset();
            Ok(Transition::new(next, vec![Effect::SetLoading(false)]))
        }
        WorkflowEvent::OutboundRequest(turn) => Ok(outbound(state, turn)),
        WorkflowEvent::DecisionObserved(decision) => {
            expect_phase(state, name, Phase::AwaitingDecision)?;
            let mut next = state.clone();
            match decision {
                Decision::Search(keywords) if !keywords.trim().is_empty() => {
                    next.phase = Phase::AwaitingResults;
                    next.pending_keywords = Some(keywords.clone());
                    Ok(Transition::new(next, vec![Effect::SubmitKeywords(keywords)]))
                }
                _ => {
                    next.reset();
                    Ok(Transition::new(next, vec![Effect::SetLoading(false)]))
                }
            }
        }
        WorkflowEvent::ResubmissionFailed => {
            expect_phase(state, name, Phase::AwaitingResults)?;
            let mut next = state.clone();
            next.reset();
            Ok(Transition::new(next, vec![Effect::SetLoading(false)]))
        }
        WorkflowEvent::SearchSettled { round_trip } => {
            expect_phase(state, name, Phase::Idle)?;
            expect_round_trip(state, name, round_trip)?;
            Ok(Transition::new(state.clone(), vec![Effect::SetLoading(false)]))
        }
        WorkflowEvent::DecisionTimedOut { round_trip } => {
            expect_phase(state, name, Phase::AwaitingDecision)?;
            expect_round_trip(state, name, round_trip)?;
            let mut next = state.clone();
            next.reset();
            Ok(Transition::new(next, vec![Effect::SetLoading(false)]))
        }
    }
}

fn outbound(state: &WorkflowState, turn: OutboundTurn) -> Transition {
    let mut next = state.clone();

    if !state.armed {
        next.reset();
        return Transition::new(next, vec![Effect::SetLoading(false)]);
    }

    match state.phase {
        Phase::Idle => {
            next.phase = Phase::AwaitingDecision;
            next.round_trip = state.round_trip.wrapping_add(1);
            next.original_query = Some(turn.user_content);
            next.prior_history = turn.prior_history;
            let effects = vec![
                Effect::RewriteLastTurn(PromptTemplate::decision(&turn.full_transcript)),
                Effect::SetLoading(true),
                Effect::ArmDecisionTimeout {
                    round_trip: next.round_trip,
                },
            ];
            Transition::new(next, effects)
        }
        // A stray request mid round-trip goes out untouched, loading stays on.
        Phase::AwaitingDecision => Transition::new(next, Vec::new()),
        Phase::AwaitingResults => {
            let pending = PendingSearch {
                keywords: state.pending_keywords.clone().unwrap_or_default(),
                original_query: state.original_query.clone().unwrap_or_default(),
                prior_history: state.prior_history.clone(),
                round_trip: state.round_trip,
            };
            next.reset();
            Transition::new(next, vec![Effect::RunSearch(pending)])
        }
    }
}

fn expect_phase(
    state: &WorkflowState,
    event: &'static str,
    expected: Phase,
) -> Result<(), TransitionRejected> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(TransitionRejected::PhaseMismatch {
            event,
            expected,
            actual: state.phase,
        })
    }
}

fn expect_round_trip(
    state: &WorkflowState,
    event: &'static str,
    round_trip: u64,
) -> Result<(), TransitionRejected> {
    if state.round_trip == round_trip {
        Ok(())
    } else {
        Err(TransitionRejected::StaleRoundTrip {
            event,
            stale: round_trip,
            current: state.round_trip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(content: &str) -> OutboundTurn {
        OutboundTurn {
            user_content: content.to_string(),
            prior_history: None,
            full_transcript: format!("User: {}", content),
        }
    }

    fn armed() -> WorkflowState {
        WorkflowState::new(true)
    }

    fn awaiting_decision() -> WorkflowState {
        transition(&armed(), WorkflowEvent::OutboundRequest(turn("who won?")))
            .unwrap()
            .state
    }

    fn awaiting_results() -> WorkflowState {
        transition(
            &awaiting_decision(),
            WorkflowEvent::DecisionObserved(Decision::Search("world cup 2022".to_string())),
        )
        .unwrap()
        .state
    }

    // ==================== Outbound ====================

    #[test]
    fn test_disarmed_outbound_passes_through_and_clears_loading() {
        let t = transition(
            &WorkflowState::new(false),
            WorkflowEvent::OutboundRequest(turn("hi")),
        )
        .unwrap();
        assert_eq!(t.state.phase, Phase::Idle);
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_idle_outbound_enters_awaiting_decision() {
        let t = transition(&armed(), WorkflowEvent::OutboundRequest(turn("who won?"))).unwrap();
        assert_eq!(t.state.phase, Phase::AwaitingDecision);
        assert_eq!(t.state.original_query.as_deref(), Some("who won?"));
        assert_eq!(t.state.round_trip, 1);
        assert!(t.state.is_consistent());

        match &t.effects[0] {
            Effect::RewriteLastTurn(prompt) => {
                assert!(prompt.contains("User: who won?"));
                assert!(prompt.contains("SEARCH_KEYWORDS:"));
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert!(t.effects.contains(&Effect::SetLoading(true)));
        assert!(t.effects.contains(&Effect::ArmDecisionTimeout { round_trip: 1 }));
    }

    #[test]
    fn test_stray_outbound_during_decision_is_untouched() {
        let state = awaiting_decision();
        let t = transition(&state, WorkflowEvent::OutboundRequest(turn("another"))).unwrap();
        assert_eq!(t.state, state);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_results_outbound_runs_search_and_returns_to_idle() {
        let mut state = awaiting_results();
        state.prior_history = Some("User: earlier".to_string());
        let t = transition(&state, WorkflowEvent::OutboundRequest(turn("Keywords: x"))).unwrap();

        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.state.pending_keywords.is_none());
        assert!(t.state.original_query.is_none());
        assert!(t.state.prior_history.is_none());
        assert_eq!(
            t.effects,
            vec![Effect::RunSearch(PendingSearch {
                keywords: "world cup 2022".to_string(),
                original_query: "who won?".to_string(),
                prior_history: Some("User: earlier".to_string()),
                round_trip: 1,
            })]
        );
    }

    #[test]
    fn test_second_round_trip_bumps_counter() {
        let mut state = awaiting_results();
        state = transition(&state, WorkflowEvent::OutboundRequest(turn("k")))
            .unwrap()
            .state;
        let t = transition(&state, WorkflowEvent::OutboundRequest(turn("next"))).unwrap();
        assert_eq!(t.state.round_trip, 2);
    }

    // ==================== Decision ====================

    #[test]
    fn test_positive_decision_enters_awaiting_results() {
        let t = transition(
            &awaiting_decision(),
            WorkflowEvent::DecisionObserved(Decision::Search("rust 2024".to_string())),
        )
        .unwrap();
        assert_eq!(t.state.phase, Phase::AwaitingResults);
        assert_eq!(t.state.pending_keywords.as_deref(), Some("rust 2024"));
        assert_eq!(t.effects, vec![Effect::SubmitKeywords("rust 2024".to_string())]);
        assert!(t.state.is_consistent());
    }

    #[test]
    fn test_negative_decision_resets() {
        let t = transition(
            &awaiting_decision(),
            WorkflowEvent::DecisionObserved(Decision::NoSearch),
        )
        .unwrap();
        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.state.original_query.is_none());
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_invalid_or_blank_decision_resets() {
        for decision in [Decision::Invalid, Decision::Search("  ".to_string())] {
            let t = transition(&awaiting_decision(), WorkflowEvent::DecisionObserved(decision))
                .unwrap();
            assert_eq!(t.state.phase, Phase::Idle);
            assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
        }
    }

    #[test]
    fn test_decision_outside_awaiting_decision_is_rejected() {
        let err = transition(&armed(), WorkflowEvent::DecisionObserved(Decision::NoSearch))
            .unwrap_err();
        assert!(matches!(err, TransitionRejected::PhaseMismatch { actual: Phase::Idle, .. }));

        let err = transition(
            &awaiting_results(),
            WorkflowEvent::DecisionObserved(Decision::Search("again".to_string())),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TransitionRejected::PhaseMismatch {
                actual: Phase::AwaitingResults,
                ..
            }
        ));
    }

    // ==================== Failures and timers ====================

    #[test]
    fn test_resubmission_failure_resets() {
        let t = transition(&awaiting_results(), WorkflowEvent::ResubmissionFailed).unwrap();
        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.state.pending_keywords.is_none());
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_resubmission_failure_when_idle_is_rejected() {
        assert!(transition(&armed(), WorkflowEvent::ResubmissionFailed).is_err());
    }

    #[test]
    fn test_search_settled_clears_loading_for_current_round_trip() {
        let idle_after = transition(&awaiting_results(), WorkflowEvent::OutboundRequest(turn("k")))
            .unwrap()
            .state;
        let t = transition(&idle_after, WorkflowEvent::SearchSettled { round_trip: 1 }).unwrap();
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_search_settled_after_new_round_trip_is_rejected() {
        let idle_after = transition(&awaiting_results(), WorkflowEvent::OutboundRequest(turn("k")))
            .unwrap()
            .state;
        let next = transition(&idle_after, WorkflowEvent::OutboundRequest(turn("new")))
            .unwrap()
            .state;
        let err = transition(&next, WorkflowEvent::SearchSettled { round_trip: 1 }).unwrap_err();
        assert!(matches!(err, TransitionRejected::PhaseMismatch { .. }));
    }

    #[test]
    fn test_decision_timeout_resets_current_round_trip() {
        let t = transition(
            &awaiting_decision(),
            WorkflowEvent::DecisionTimedOut { round_trip: 1 },
        )
        .unwrap();
        assert_eq!(t.state.phase, Phase::Idle);
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_stale_decision_timeout_is_rejected() {
        let mut state = awaiting_decision();
        state.round_trip = 3;
        let err = transition(&state, WorkflowEvent::DecisionTimedOut { round_trip: 2 }).unwrap_err();
        assert_eq!(
            err,
            TransitionRejected::StaleRoundTrip {
                event: "decision_timed_out",
                stale: 2,
                current: 3,
            }
        );
    }

    // ==================== Arming ====================

    #[test]
    fn test_disarm_mid_round_trip_resets_everything() {
        let t = transition(&awaiting_results(), WorkflowEvent::Disarmed).unwrap();
        assert!(!t.state.armed);
        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.state.pending_keywords.is_none());
        assert!(t.state.original_query.is_none());
        assert_eq!(t.effects, vec![Effect::SetLoading(false)]);
    }

    #[test]
    fn test_arm_resets_round_trip_fields() {
        let t = transition(&awaiting_decision(), WorkflowEvent::Armed).unwrap();
        assert!(t.state.armed);
        assert_eq!(t.state.phase, Phase::Idle);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_every_accepted_transition_is_consistent() {
        let events = [
            WorkflowEvent::OutboundRequest(turn("a")),
            WorkflowEvent::DecisionObserved(Decision::Search("b".to_string())),
            WorkflowEvent::OutboundRequest(turn("c")),
            WorkflowEvent::SearchSettled { round_trip: 1 },
            WorkflowEvent::OutboundRequest(turn("d")),
            WorkflowEvent::DecisionObserved(Decision::NoSearch),
            WorkflowEvent::Disarmed,
        ];
        let mut state = armed();
        for event in events {
            state = transition(&state, event).unwrap().state;
            assert!(state.is_consistent(), "inconsistent: {:?}", state);
        }
    }
}
