//! Shared round-trip state and the effect executor.
//!
//! [`SearchWorkflow`] owns the single [`WorkflowState`] that the three entry
//! points (interceptor, watcher, driver) share. Every change goes through
//! [`SearchWorkflow::dispatch`], which applies the pure domain
//! [`transition`] under a lock and releases the lock before any effect runs.
//!
//! Loading changes and decision timers are run here. Effects that need the
//! caller's context (rewriting a request body, submitting keywords, running
//! the search) are returned to the caller.

use crate::ports::ui_surface::UiSurface;
use relay_domain::workflow::{
    Effect, Phase, TransitionRejected, WorkflowEvent, WorkflowState, transition,
};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// The one workflow instance per chat host.
pub struct SearchWorkflow {
    state: Mutex<WorkflowState>,
    ui: Arc<dyn UiSurface>,
    decision_timeout: Option<Duration>,
}

impl SearchWorkflow {
    pub fn new(armed: bool, ui: Arc<dyn UiSurface>) -> Self {
        Self {
            state: Mutex::new(WorkflowState::new(armed)),
            ui,
            decision_timeout: None,
        }
    }

    /// Abandon a round-trip stuck in `AwaitingDecision` after `timeout`.
    pub fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn is_armed(&self) -> bool {
        self.lock().armed
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> WorkflowState {
        self.lock().clone()
    }

    /// Apply `event` and execute the effects that belong to the workflow.
    ///
    /// Loading changes are applied before the state lock is released, so
    /// the indicator always follows the order of transitions. Decision
    /// timers are armed after it. Returns the effects the caller must
    /// execute, in order. A rejected event leaves the state untouched.
    ///
    /// [`UiSurface::set_loading`] runs under the state lock and must not
    /// call back into the workflow.
    pub fn dispatch(
        self: &Arc<Self>,
        event: WorkflowEvent,
    ) -> Result<Vec<Effect>, TransitionRejected> {
        let name = event.name();
        let (from, effects) = {
            let mut state = self.lock();
            let from = state.phase;
            let next = transition(&state, event).inspect_err(|rejected| {
                debug!("Discarded {}: {}", name, rejected);
            })?;
            *state = next.state;
            if state.phase != from {
                info!(
                    event = name,
                    round_trip = state.round_trip,
                    "Phase {} -> {}",
                    from,
                    state.phase
                );
            }

            let mut effects = Vec::with_capacity(next.effects.len());
            for effect in next.effects {
                match effect {
                    Effect::SetLoading(loading) => self.ui.set_loading(loading),
                    other => effects.push(other),
                }
            }
            (from, effects)
        };
        debug!(event = name, from = %from, effects = effects.len(), "Transition applied");

        let mut remaining = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::ArmDecisionTimeout { round_trip } => self.arm_decision_timeout(round_trip),
                other => remaining.push(other),
            }
        }
        Ok(remaining)
    }

    fn arm_decision_timeout(self: &Arc<Self>, round_trip: u64) {
        let Some(timeout) = self.decision_timeout else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; decision timeout for round-trip {round_trip} not armed");
            return;
        };
        let workflow = Arc::clone(self);
        runtime.spawn(async move {
            tokio::time::sleep(timeout).await;
            if workflow
                .dispatch(WorkflowEvent::DecisionTimedOut { round_trip })
                .is_ok()
            {
                warn!(
                    "No decision sentinel within {:?}; round-trip {} abandoned",
                    timeout, round_trip
                );
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
