//! Keyword resubmission driver.
//!
//! Puts the keyword turn through the host the way a user would: type it into
//! the composer, fire the notifications the host listens for, wait for the
//! send control to become enabled, press it. The resulting request reaches
//! the interceptor while the workflow is in `AwaitingResults`.

use crate::ports::host_surface::{HostSurface, InputNotification, SubmitControl};
use crate::timing::{BoundedRetry, RetryOutcome};
use crate::workflow::SearchWorkflow;
use relay_domain::prompt::PromptTemplate;
use relay_domain::workflow::{Phase, WorkflowEvent};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a resubmission did not happen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResubmitFailure {
    #[error("workflow is no longer awaiting results")]
    NotAwaitingResults,

    #[error("composer not found")]
    ComposerMissing,

    #[error("no enabled send control after {0} attempts")]
    NoSubmitControl(u32),

    #[error("host ignored activation of control '{0}'")]
    ControlIgnored(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResubmitOutcome {
    Submitted { control_id: String, via_fallback: bool },
    Abandoned(ResubmitFailure),
}

/// Drives the keyword turn through a [`HostSurface`].
pub struct KeywordResubmitter {
    host: Arc<dyn HostSurface>,
    workflow: Arc<SearchWorkflow>,
    retry: BoundedRetry,
    initial_delay: Duration,
}

impl KeywordResubmitter {
    pub fn new(
        host: Arc<dyn HostSurface>,
        workflow: Arc<SearchWorkflow>,
        retry: BoundedRetry,
        initial_delay: Duration,
    ) -> Self {
        Self {
            host,
            workflow,
            retry,
            initial_delay,
        }
    }

    /// Submit the keyword turn for `keywords`.
    ///
    /// On failure the round-trip is reset; if the workflow already left
    /// `AwaitingResults` nothing is touched.
    pub async fn submit(&self, keywords: &str) -> ResubmitOutcome {
        match self.try_submit(keywords).await {
            Ok(outcome) => outcome,
            Err(ResubmitFailure::NotAwaitingResults) => {
                debug!("Resubmission skipped: workflow moved on");
                ResubmitOutcome::Abandoned(ResubmitFailure::NotAwaitingResults)
            }
            Err(failure) => {
                warn!("Keyword resubmission failed: {}", failure);
                if let Err(rejected) = self.workflow.dispatch(WorkflowEvent::ResubmissionFailed) {
                    debug!("Reset after failed resubmission discarded: {}", rejected);
                }
                ResubmitOutcome::Abandoned(failure)
            }
        }
    }

    async fn try_submit(&self, keywords: &str) -> Result<ResubmitOutcome, ResubmitFailure> {
        self.ensure_awaiting()?;

        let composer = self
            .host
            .find_composer()
            .ok_or(ResubmitFailure::ComposerMissing)?;

        let turn = PromptTemplate::resubmission_turn(keywords);
        self.host.set_value(&composer, &turn);
        self.host.dispatch(&composer, InputNotification::Input);
        self.host.dispatch(&composer, InputNotification::Change);
        debug!("Keyword turn typed into composer {}", composer);

        tokio::time::sleep(self.initial_delay).await;
        self.ensure_awaiting()?;

        let host = &self.host;
        let outcome = self
            .retry
            .run(
                || host.submit_controls().into_iter().find(SubmitControl::qualifies),
                || host.submit_controls().into_iter().find(|c| c.enabled),
            )
            .await;

        let (control, via_fallback) = match outcome {
            RetryOutcome::Found { value, attempt } => {
                debug!("Send control '{}' ready after {} attempt(s)", value.id, attempt);
                (value, false)
            }
            RetryOutcome::Fallback(value) => {
                warn!("Send control not recognized, using submit control '{}'", value.id);
                (value, true)
            }
            RetryOutcome::Exhausted => {
                return Err(ResubmitFailure::NoSubmitControl(self.retry.attempts()));
            }
        };

        self.ensure_awaiting()?;
        if !self.host.activate(&control) {
            return Err(ResubmitFailure::ControlIgnored(control.id));
        }

        info!("Keyword turn submitted via '{}'", control.id);
        Ok(ResubmitOutcome::Submitted {
            control_id: control.id,
            via_fallback,
        })
    }

    fn ensure_awaiting(&self) -> Result<(), ResubmitFailure> {
        if self.workflow.phase() == Phase::AwaitingResults {
            Ok(())
        } else {
            Err(ResubmitFailure::NotAwaitingResults)
        }
    }
}
