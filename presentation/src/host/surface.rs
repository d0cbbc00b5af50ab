//! Composer and send control of the terminal host.
//!
//! The host keeps two composer values: the raw value last assigned, and the
//! committed value its model acts on. Only an input notification copies the
//! raw value into the committed one, so assigning a value without notifying
//! leaves the send control disabled.

use relay_application::ports::host_surface::{
    ComposerId, HostSurface, InputNotification, SubmitControl,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::debug;

pub const COMPOSER_ID: &str = "composer";
pub const SEND_CONTROL_ID: &str = "send";

/// Work handed from the surface to the host loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// The send control was pressed with this committed text.
    Submit {
        text: String,
        /// The text was typed at the keyboard rather than assigned.
        typed: bool,
    },
}

#[derive(Debug, Default)]
struct SurfaceState {
    value: String,
    committed: String,
    typed: bool,
    streaming: bool,
}

/// [`HostSurface`] over the terminal host's composer and send control.
pub struct TerminalSurface {
    state: Mutex<SurfaceState>,
    commands: mpsc::UnboundedSender<HostCommand>,
}

impl TerminalSurface {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<HostCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let surface = Arc::new(Self {
            state: Mutex::new(SurfaceState::default()),
            commands: tx,
        });
        (surface, rx)
    }

    /// The user typed a line and pressed enter.
    pub fn type_and_send(&self, line: &str) -> bool {
        {
            let mut state = self.lock();
            state.value = line.to_string();
            state.committed = line.to_string();
            state.typed = true;
        }
        self.activate(&self.send_control())
    }

    /// Mark a reply as streaming (send control disabled) or finished.
    pub fn set_streaming(&self, streaming: bool) {
        self.lock().streaming = streaming;
    }

    pub fn is_streaming(&self) -> bool {
        self.lock().streaming
    }

    fn send_control(&self) -> SubmitControl {
        let state = self.lock();
        SubmitControl {
            id: SEND_CONTROL_ID.to_string(),
            enabled: !state.committed.trim().is_empty() && !state.streaming,
            send_icon: true,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostSurface for TerminalSurface {
    fn find_composer(&self) -> Option<ComposerId> {
        Some(ComposerId(COMPOSER_ID.to_string()))
    }

    fn set_value(&self, _composer: &ComposerId, value: &str) {
        let mut state = self.lock();
        state.value = value.to_string();
        state.typed = false;
    }

    fn dispatch(&self, _composer: &ComposerId, notification: InputNotification) {
        let mut state = self.lock();
        state.committed = state.value.clone();
        debug!("Composer {:?}: {} chars committed", notification, state.committed.len());
    }

    fn submit_controls(&self) -> Vec<SubmitControl> {
        vec![self.send_control()]
    }

    fn activate(&self, control: &SubmitControl) -> bool {
        if control.id != SEND_CONTROL_ID {
            return false;
        }
        let command = {
            let mut state = self.lock();
            if state.committed.trim().is_empty() || state.streaming {
                return false;
            }
            let text = std::mem::take(&mut state.committed);
            state.value.clear();
            // Busy from the moment the turn is accepted.
            state.streaming = true;
            HostCommand::Submit {
                text,
                typed: std::mem::take(&mut state.typed),
            }
        };
        self.commands.send(command).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> ComposerId {
        ComposerId(COMPOSER_ID.to_string())
    }

    #[test]
    fn test_value_without_notification_keeps_send_disabled() {
        let (surface, _rx) = TerminalSurface::new();
        surface.set_value(&composer(), "hello");

        let controls = surface.submit_controls();
        assert!(!controls[0].enabled);
        assert!(!surface.activate(&controls[0]));
    }

    #[test]
    fn test_notification_commits_and_enables_send() {
        let (surface, mut rx) = TerminalSurface::new();
        surface.set_value(&composer(), "hello");
        surface.dispatch(&composer(), InputNotification::Input);

        let control = surface.submit_controls().remove(0);
        assert!(control.qualifies());
        assert!(surface.activate(&control));
        assert_eq!(
            rx.try_recv().unwrap(),
            HostCommand::Submit {
                text: "hello".to_string(),
                typed: false
            }
        );
        // Busy until the host finishes the reply.
        assert!(!surface.submit_controls()[0].enabled);
    }

    #[test]
    fn test_send_disabled_while_streaming() {
        let (surface, _rx) = TerminalSurface::new();
        surface.set_streaming(true);
        surface.set_value(&composer(), "hello");
        surface.dispatch(&composer(), InputNotification::Change);

        assert!(!surface.submit_controls()[0].enabled);

        surface.set_streaming(false);
        assert!(surface.submit_controls()[0].enabled);
    }

    #[test]
    fn test_typed_line_is_marked() {
        let (surface, mut rx) = TerminalSurface::new();
        assert!(surface.type_and_send("hi"));
        assert_eq!(
            rx.try_recv().unwrap(),
            HostCommand::Submit {
                text: "hi".to_string(),
                typed: true
            }
        );
    }

    #[test]
    fn test_blank_line_is_not_sent() {
        let (surface, mut rx) = TerminalSurface::new();
        assert!(!surface.type_and_send("   "));
        assert!(rx.try_recv().is_err());
    }
}
