//! Console UI surface.
//!
//! The loading indicator is an indicatif spinner; everything else is plain
//! colored lines. All output goes through [`ConsoleUi::print_line`] so text
//! printed while the spinner is visible does not tear it.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use relay_application::ports::ui_surface::UiSurface;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// [`UiSurface`] for the terminal host.
pub struct ConsoleUi {
    spinner: Mutex<Option<ProgressBar>>,
    prompt_shown: AtomicBool,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            prompt_shown: AtomicBool::new(false),
        }
    }

    /// Force colored output on or off for the whole process.
    pub fn with_color(self, color: bool) -> Self {
        colored::control::set_override(color);
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Print a line without disturbing the spinner.
    pub fn print_line(&self, line: &str) {
        let spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match spinner.as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    pub fn info(&self, message: &str) {
        self.print_line(&format!("{} {}", "->".cyan(), message));
    }

    pub fn error(&self, message: &str) {
        self.print_line(&format!("{} {}", "x".red(), message));
    }

    /// Echo a turn the user did not type themselves.
    pub fn echo_user_turn(&self, text: &str) {
        self.print_line(&format!("{} {}", ">".bold().blue(), text.dimmed()));
    }

    /// Allow the credential prompt to show again, e.g. after the key was
    /// saved or reset.
    pub fn credential_saved(&self) {
        self.prompt_shown.store(false, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn badge(armed: bool) -> String {
        if armed {
            format!("[{}]", "search: on".magenta().bold())
        } else {
            format!("[{}]", "search: off".dimmed())
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSurface for ConsoleUi {
    fn show_credential_prompt(&self) {
        if self.prompt_shown.swap(true, Ordering::SeqCst) {
            return;
        }
        self.print_line(&format!(
            "{} {}",
            "!".yellow().bold(),
            "Web search needs an Exa API key. Save one with: /key <EXA_API_KEY>".yellow()
        ));
    }

    fn set_loading(&self, loading: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match (loading, spinner.is_some()) {
            (true, false) => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_message("Searching...");
                pb.enable_steady_tick(SPINNER_TICK);
                *spinner = Some(pb);
            }
            (false, true) => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }

    fn render_toggle(&self, armed: bool) {
        self.print_line(&Self::badge(armed));
    }
}
