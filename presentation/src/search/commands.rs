//! Search-mode slash commands.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/search [on\|off]` | toggle search mode |
//! | `/key <KEY>` | save the Exa API key |
//! | `/reset-key` | forget the Exa API key |
//! | `/set <option> <n>` | set `results`, `subpages`, `links` or `image-links` |
//! | `/options` | list settings |
//! | `/debug` | toggle debug logging (next start) |
//! | `/status` | show the round-trip phase |

use crate::host::extension::{CommandExtension, CommandOutcome};
use crate::ui::ConsoleUi;
use colored::Colorize;
use relay_application::use_cases::{SettingsUseCase, ToggleOutcome, ToggleSearchUseCase};
use relay_application::workflow::SearchWorkflow;
use std::sync::Arc;

/// A parsed search command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// `None` flips the current mode.
    Toggle(Option<bool>),
    SetKey(String),
    ResetKey,
    SetOption { name: String, value: String },
    Options,
    Debug,
    Status,
}

impl SearchCommand {
    /// Parse `/name args`. `None` for commands that are not search commands.
    pub fn parse(name: &str, args: &str) -> Option<Result<Self, String>> {
        let parsed = match name {
            "search" => match args {
                "" => Ok(Self::Toggle(None)),
                "on" => Ok(Self::Toggle(Some(true))),
                "off" => Ok(Self::Toggle(Some(false))),
                other => Err(format!("expected 'on' or 'off', got '{}'", other)),
            },
            "key" => {
                if args.is_empty() {
                    Err("usage: /key <EXA_API_KEY>".to_string())
                } else {
                    Ok(Self::SetKey(args.to_string()))
                }
            }
            "reset-key" => Ok(Self::ResetKey),
            "set" => match args.split_whitespace().collect::<Vec<_>>().as_slice() {
                [name, value] => Ok(Self::SetOption {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
                _ => Err("usage: /set <results|subpages|links|image-links> <n>".to_string()),
            },
            "options" => Ok(Self::Options),
            "debug" => Ok(Self::Debug),
            "status" => Ok(Self::Status),
            _ => return None,
        };
        Some(parsed)
    }
}

/// [`CommandExtension`] wiring search commands to the use cases.
pub struct SearchCommands {
    toggle: ToggleSearchUseCase,
    settings: SettingsUseCase,
    workflow: Arc<SearchWorkflow>,
    ui: Arc<ConsoleUi>,
}

impl SearchCommands {
    pub fn new(
        toggle: ToggleSearchUseCase,
        settings: SettingsUseCase,
        workflow: Arc<SearchWorkflow>,
        ui: Arc<ConsoleUi>,
    ) -> Self {
        Self {
            toggle,
            settings,
            workflow,
            ui,
        }
    }

    fn execute(&self, command: SearchCommand) {
        match command {
            SearchCommand::Toggle(target) => {
                let outcome = match target {
                    Some(on) => self.toggle.set_armed(on),
                    None => self.toggle.toggle(),
                };
                if outcome == ToggleOutcome::CredentialRequired {
                    self.ui.error("Search mode needs an Exa API key first");
                }
            }
            SearchCommand::SetKey(key) => match self.settings.set_api_key(&key) {
                Ok(()) => {
                    self.ui.credential_saved();
                    self.ui.info("Exa API key saved");
                }
                Err(e) => self.ui.error(&e.to_string()),
            },
            SearchCommand::ResetKey => match self.settings.reset_api_key() {
                Ok(()) => {
                    self.ui.credential_saved();
                    if self.workflow.is_armed() {
                        self.toggle.set_armed(false);
                    }
                    self.ui.info("Exa API key removed");
                }
                Err(e) => self.ui.error(&e.to_string()),
            },
            SearchCommand::SetOption { name, value } => {
                match self.settings.set_option(&name, &value) {
                    Ok(value) => self.ui.info(&format!("{} = {}", name, value)),
                    Err(e) => self.ui.error(&e.to_string()),
                }
            }
            SearchCommand::Options => {
                for view in self.settings.options() {
                    let value = view
                        .value
                        .unwrap_or_else(|| format!("{} (default)", view.default).dimmed().to_string());
                    self.ui.print_line(&format!(
                        "  {:<12} {:<24} {}",
                        view.alias.cyan(),
                        value,
                        view.description.dimmed()
                    ));
                }
            }
            SearchCommand::Debug => match self.settings.toggle_debug() {
                Ok(enabled) => self.ui.info(&format!(
                    "Debug logging {} (takes effect on next start)",
                    if enabled { "enabled" } else { "disabled" }
                )),
                Err(e) => self.ui.error(&e.to_string()),
            },
            SearchCommand::Status => {
                let state = self.workflow.snapshot();
                self.ui.info(&format!(
                    "search {} | phase {} | round-trip {}",
                    if state.armed { "on" } else { "off" },
                    state.phase.display_name(),
                    state.round_trip
                ));
            }
        }
    }
}

impl CommandExtension for SearchCommands {
    fn help(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("/search [on|off]", "Toggle web search mode"),
            ("/key <KEY>", "Save the Exa API key"),
            ("/reset-key", "Forget the Exa API key"),
            ("/set <option> <n>", "Set results, subpages, links or image-links"),
            ("/options", "Show search settings"),
            ("/debug", "Toggle debug logging"),
            ("/status", "Show search round-trip status"),
        ]
    }

    fn handle(&self, name: &str, args: &str) -> CommandOutcome {
        match SearchCommand::parse(name, args) {
            None => CommandOutcome::Unknown,
            Some(Ok(command)) => {
                self.execute(command);
                CommandOutcome::Handled
            }
            Some(Err(usage)) => {
                self.ui.error(&usage);
                CommandOutcome::Handled
            }
        }
    }
}
