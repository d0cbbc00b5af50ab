//! Terminal chat host
//!
//! A plain streaming chat client: a composer, a send control, and a
//! rendering surface that reports every change to a reply. The host knows
//! nothing about search; it exposes its transport, its composer and send
//! control ([`TerminalSurface`]) and its render observer hook.

pub mod extension;
pub mod input;
pub mod render;
pub mod repl;
pub mod surface;

pub use extension::{CommandExtension, CommandOutcome, NoExtension};
pub use input::{InputEvent, LineReader};
pub use render::ReplyRenderer;
pub use repl::ChatHost;
pub use surface::{HostCommand, TerminalSurface};
