//! Slash-command extension point.
//!
//! The host owns `/help`, `/clear` and `/quit`. Every other slash command is
//! offered to the installed [`CommandExtension`].

/// Result of offering a command to an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Handled,
    Unknown,
}

/// Additional slash commands contributed to the host.
pub trait CommandExtension: Send + Sync {
    /// `(usage, description)` rows for `/help`.
    fn help(&self) -> Vec<(&'static str, &'static str)>;

    /// Handle `/name args`. `name` has no leading slash.
    fn handle(&self, name: &str, args: &str) -> CommandOutcome;
}

/// Extension that knows no commands
pub struct NoExtension;

impl CommandExtension for NoExtension {
    fn help(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    fn handle(&self, _name: &str, _args: &str) -> CommandOutcome {
        CommandOutcome::Unknown
    }
}

/// Split `/name rest of line` into `("name", "rest of line")`.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let body = line.trim().strip_prefix('/')?;
    let (name, args) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    (!name.is_empty()).then(|| (name, args.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("/quit"), Some(("quit", "")));
        assert_eq!(split_command("  /set results  8 "), Some(("set", "results  8")));
        assert_eq!(split_command("/"), None);
        assert_eq!(split_command("hello"), None);
    }
}
