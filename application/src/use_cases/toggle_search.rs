//! Toggle Search use case.
//!
//! Arming search mode requires a saved credential. Without one the
//! credential prompt is shown and the mode stays off. Any toggle resets the
//! current round-trip.

use crate::ports::settings_store::SettingsStore;
use crate::ports::ui_surface::UiSurface;
use crate::workflow::SearchWorkflow;
use relay_domain::config::setting_key::EXA_API_KEY;
use relay_domain::workflow::WorkflowEvent;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Armed,
    Disarmed,
    /// Arming was refused because no credential is saved.
    CredentialRequired,
}

pub struct ToggleSearchUseCase {
    workflow: Arc<SearchWorkflow>,
    settings: Arc<dyn SettingsStore>,
    ui: Arc<dyn UiSurface>,
}

impl ToggleSearchUseCase {
    pub fn new(
        workflow: Arc<SearchWorkflow>,
        settings: Arc<dyn SettingsStore>,
        ui: Arc<dyn UiSurface>,
    ) -> Self {
        Self {
            workflow,
            settings,
            ui,
        }
    }

    /// Flip the current mode.
    pub fn toggle(&self) -> ToggleOutcome {
        self.set_armed(!self.workflow.is_armed())
    }

    pub fn set_armed(&self, on: bool) -> ToggleOutcome {
        if on && self.settings.get_non_empty(EXA_API_KEY).is_none() {
            self.ui.show_credential_prompt();
            return ToggleOutcome::CredentialRequired;
        }

        let event = if on {
            WorkflowEvent::Armed
        } else {
            WorkflowEvent::Disarmed
        };
        // Armed and Disarmed are accepted in every phase.
        let _ = self.workflow.dispatch(event);
        self.ui.render_toggle(on);
        info!("Search mode {}", if on { "on" } else { "off" });

        if on {
            ToggleOutcome::Armed
        } else {
            ToggleOutcome::Disarmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::settings_store::InMemorySettingsStore;
    use crate::workflow::tests::{RecordingUi, turn};
    use relay_domain::workflow::Phase;

    fn use_case(store: InMemorySettingsStore) -> (ToggleSearchUseCase, Arc<SearchWorkflow>, Arc<RecordingUi>) {
        let ui = Arc::new(RecordingUi::default());
        let workflow = Arc::new(SearchWorkflow::new(false, ui.clone()));
        let toggle = ToggleSearchUseCase::new(workflow.clone(), Arc::new(store), ui.clone());
        (toggle, workflow, ui)
    }

    #[test]
    fn test_arming_without_key_shows_prompt() {
        let (toggle, workflow, ui) = use_case(InMemorySettingsStore::new());

        assert_eq!(toggle.toggle(), ToggleOutcome::CredentialRequired);
        assert!(!workflow.is_armed());
        assert_eq!(*ui.prompts.lock().unwrap(), 1);
        assert!(ui.toggles.lock().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let (toggle, workflow, ui) =
            use_case(InMemorySettingsStore::new().with(EXA_API_KEY, "k"));

        assert_eq!(toggle.toggle(), ToggleOutcome::Armed);
        assert!(workflow.is_armed());
        assert_eq!(toggle.toggle(), ToggleOutcome::Disarmed);
        assert!(!workflow.is_armed());
        assert_eq!(*ui.toggles.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_disarm_mid_round_trip_resets_and_stops_spinner() {
        let (toggle, workflow, ui) =
            use_case(InMemorySettingsStore::new().with(EXA_API_KEY, "k"));
        toggle.set_armed(true);
        workflow
            .dispatch(WorkflowEvent::OutboundRequest(turn("q")))
            .unwrap();
        assert_eq!(ui.last_loading(), Some(true));

        assert_eq!(toggle.set_armed(false), ToggleOutcome::Disarmed);

        assert_eq!(workflow.phase(), Phase::Idle);
        assert_eq!(ui.last_loading(), Some(false));
    }

    #[test]
    fn test_disarm_never_needs_key() {
        let (toggle, _workflow, _ui) = use_case(InMemorySettingsStore::new());
        assert_eq!(toggle.set_armed(false), ToggleOutcome::Disarmed);
    }
}
