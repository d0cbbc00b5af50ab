//! Workflow timing parameters.
//!
//! [`WorkflowParams`] groups every delay, timeout and attempt count used by
//! the round-trip use cases. These are application-layer concerns, not
//! domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and retry parameters for one workflow.
///
/// | Parameter | Used by | Default |
/// |-----------|---------|---------|
/// | `debounce` | Response watcher | 750 ms |
/// | `search_timeout` | Web search | 60 s |
/// | `decision_timeout` | Search workflow | 120 s |
/// | `submit_initial_delay` | Resubmission driver | 150 ms |
/// | `submit_attempts` | Resubmission driver | 25 |
/// | `submit_interval` | Resubmission driver | 150 ms |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowParams {
    /// Trailing-edge delay before a reply snapshot is evaluated.
    pub debounce: Duration,
    /// Upper bound on a single search call.
    pub search_timeout: Duration,
    /// How long to wait for a sentinel before abandoning the round-trip.
    /// `None` waits indefinitely.
    pub decision_timeout: Option<Duration>,
    /// Pause between typing the keyword turn and the first poll.
    pub submit_initial_delay: Duration,
    /// Maximum polls for an enabled send control.
    pub submit_attempts: u32,
    /// Pause between polls.
    pub submit_interval: Duration,
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(750),
            search_timeout: Duration::from_secs(60),
            decision_timeout: Some(Duration::from_secs(120)),
            submit_initial_delay: Duration::from_millis(150),
            submit_attempts: 25,
            submit_interval: Duration::from_millis(150),
        }
    }
}

impl WorkflowParams {
    // ==================== Builder Methods ====================

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn with_submit_initial_delay(mut self, delay: Duration) -> Self {
        self.submit_initial_delay = delay;
        self
    }

    pub fn with_submit_attempts(mut self, attempts: u32) -> Self {
        self.submit_attempts = attempts;
        self
    }

    pub fn with_submit_interval(mut self, interval: Duration) -> Self {
        self.submit_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = WorkflowParams::default();
        assert_eq!(params.debounce, Duration::from_millis(750));
        assert_eq!(params.search_timeout, Duration::from_secs(60));
        assert_eq!(params.submit_attempts, 25);
    }

    #[test]
    fn test_builder() {
        let params = WorkflowParams::default()
            .with_debounce(Duration::from_millis(10))
            .with_decision_timeout(None)
            .with_submit_attempts(3);
        assert_eq!(params.debounce, Duration::from_millis(10));
        assert!(params.decision_timeout.is_none());
        assert_eq!(params.submit_attempts, 3);
    }
}
