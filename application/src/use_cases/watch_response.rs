//! Response watcher.
//!
//! Observes assistant replies as they render and, once a reply carrying a
//! sentinel has been quiet for the debounce delay, feeds its text to the
//! workflow as a decision. A `Search` decision starts the resubmission
//! driver in the background.

use crate::ports::render_observer::RenderObserver;
use crate::timing::Debouncer;
use crate::use_cases::resubmit_keywords::KeywordResubmitter;
use crate::workflow::SearchWorkflow;
use relay_domain::render::{ElementId, Mutation};
use relay_domain::sentinel::{Decision, contains_sentinel, parse_decision};
use relay_domain::util::log_preview;
use relay_domain::workflow::{Effect, Phase, WorkflowEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Turns a settled reply snapshot into a workflow decision.
pub struct DecisionEvaluator {
    workflow: Arc<SearchWorkflow>,
    resubmitter: Arc<KeywordResubmitter>,
}

impl DecisionEvaluator {
    pub fn new(workflow: Arc<SearchWorkflow>, resubmitter: Arc<KeywordResubmitter>) -> Self {
        Self {
            workflow,
            resubmitter,
        }
    }

    /// Evaluate one settled snapshot. Returns the decision the workflow
    /// accepted, if any.
    ///
    /// Must be called from within a Tokio runtime when the decision may be
    /// `Search`, since the driver is spawned.
    pub fn evaluate(&self, text: &str) -> Option<Decision> {
        if self.workflow.phase() != Phase::AwaitingDecision {
            debug!("Reply settled outside AwaitingDecision, ignoring");
            return None;
        }
        let decision = parse_decision(text)?;
        info!("Decision observed: {:?} ({})", decision, log_preview(text, 80));

        let effects = match self
            .workflow
            .dispatch(WorkflowEvent::DecisionObserved(decision.clone()))
        {
            Ok(effects) => effects,
            Err(rejected) => {
                debug!("Decision discarded: {}", rejected);
                return None;
            }
        };

        for effect in effects {
            match effect {
                Effect::SubmitKeywords(keywords) => {
                    let resubmitter = Arc::clone(&self.resubmitter);
                    tokio::spawn(async move {
                        resubmitter.submit(&keywords).await;
                    });
                }
                other => warn!("Unexpected effect after decision: {:?}", other),
            }
        }
        Some(decision)
    }
}

/// [`RenderObserver`] that debounces assistant replies into the evaluator.
pub struct ResponseWatcher {
    workflow: Arc<SearchWorkflow>,
    debouncer: Debouncer<ElementId, String>,
}

impl ResponseWatcher {
    pub fn new(evaluator: Arc<DecisionEvaluator>, debounce: Duration) -> Self {
        let workflow = Arc::clone(&evaluator.workflow);
        let debouncer = Debouncer::new(debounce, move |element: ElementId, text: String| {
            debug!("{} settled, evaluating", element);
            evaluator.evaluate(&text);
        });
        Self {
            workflow,
            debouncer,
        }
    }

    /// Elements with an evaluation pending.
    pub fn pending(&self) -> usize {
        self.debouncer.pending()
    }
}

impl RenderObserver for ResponseWatcher {
    fn on_mutation(&self, mutation: &Mutation) {
        if self.workflow.phase() != Phase::AwaitingDecision {
            // The round-trip ended (decided, timed out or disarmed).
            if self.debouncer.pending() > 0 {
                debug!("Dropping {} pending evaluation(s)", self.debouncer.pending());
                self.debouncer.cancel_all();
            }
            return;
        }
        if !mutation.is_assistant() || !contains_sentinel(&mutation.text) {
            return;
        }
        self.debouncer
            .schedule(mutation.element, mutation.text.clone());
    }
}
