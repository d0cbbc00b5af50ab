//! Host surface port
//!
//! The resubmission driver has no API into the host's send pipeline. It can
//! only do what a user would: type into the composer, let the host notice,
//! and press a submit control. This port exposes exactly those affordances.
//!
//! # Flow
//!
//! ```text
//! find_composer()
//!      ↓
//! set_value(turn) → dispatch(Input) → dispatch(Change)
//!      ↓
//! poll submit_controls() until one is enabled and carries the send icon
//!      ↓
//! activate(control)
//! ```

use std::fmt;

/// Handle to the host's text-entry surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComposerId(pub String);

impl fmt::Display for ComposerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notifications the host's reactive layer listens for.
///
/// Assigning a value alone does not update the host's model; one of these
/// must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputNotification {
    Input,
    Change,
}

/// A submit-like control found in the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub id: String,
    pub enabled: bool,
    /// The control carries the host's send-icon marker.
    pub send_icon: bool,
}

impl SubmitControl {
    /// Enabled and recognizably the send control.
    pub fn qualifies(&self) -> bool {
        self.enabled && self.send_icon
    }
}

/// Affordances of the host application, as a user would see them.
pub trait HostSurface: Send + Sync {
    /// Locate the composer, if the host currently shows one.
    fn find_composer(&self) -> Option<ComposerId>;

    /// Assign the composer's raw value.
    fn set_value(&self, composer: &ComposerId, value: &str);

    /// Fire an input notification on the composer.
    fn dispatch(&self, composer: &ComposerId, notification: InputNotification);

    /// All submit-like controls currently present, in document order.
    fn submit_controls(&self) -> Vec<SubmitControl>;

    /// Press a control. Returns `false` if the host ignored it.
    fn activate(&self, control: &SubmitControl) -> bool;
}
