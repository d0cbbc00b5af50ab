//! Round-trip timing from TOML (`[workflow]` section)

use relay_application::WorkflowParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw workflow timing from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Quiet period before a reply is evaluated
    pub debounce_ms: u64,
    /// Abandon a round-trip with no decision after this long
    pub decision_timeout_seconds: u64,
    /// Maximum polls for the send control
    pub submit_attempts: u32,
    /// Pause between polls
    pub submit_interval_ms: u64,
    /// Pause between typing the keyword turn and the first poll
    pub submit_initial_delay_ms: u64,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 750,
            decision_timeout_seconds: 120,
            submit_attempts: 25,
            submit_interval_ms: 150,
            submit_initial_delay_ms: 150,
        }
    }
}

impl FileWorkflowConfig {
    /// Convert to application parameters. The search timeout lives in
    /// `[search]` and is passed in.
    pub fn to_params(&self, search_timeout: Duration) -> WorkflowParams {
        WorkflowParams::default()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_search_timeout(search_timeout)
            .with_decision_timeout(Some(Duration::from_secs(self.decision_timeout_seconds)))
            .with_submit_attempts(self.submit_attempts)
            .with_submit_interval(Duration::from_millis(self.submit_interval_ms))
            .with_submit_initial_delay(Duration::from_millis(self.submit_initial_delay_ms))
    }
}
