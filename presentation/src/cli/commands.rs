//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for search-relay
#[derive(Parser, Debug)]
#[command(name = "search-relay")]
#[command(author, version, about = "Terminal chat with model-directed web search")]
#[command(long_about = r#"
search-relay is a streaming chat client. With search armed, every turn is
first sent as a decision prompt: the model answers either
SEARCH_KEYWORDS: [..] or NO_SEARCH_NEEDED: ... . On a keyword reply the
client runs an Exa search and resubmits the turn with the results folded in.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./search-relay.toml Project-level config
3. ~/.config/search-relay/config.toml   Global config
4. SEARCH_RELAY_<SECTION>__<KEY> environment variables

Example:
  search-relay --search
  search-relay --model gpt-4o --endpoint http://localhost:11434/v1/chat/completions
"#)]
pub struct Cli {
    /// Arm web search at startup
    #[arg(short, long)]
    pub search: bool,

    /// Chat model (overrides [chat].model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Chat completions endpoint (overrides [chat].endpoint)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to stderr instead of the log directory
    #[arg(long)]
    pub log_stderr: bool,

    /// Keep settings in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["search-relay"]);
        assert!(!cli.search);
        assert!(cli.model.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["search-relay", "-s", "-vv", "--model", "m", "--ephemeral"]);
        assert!(cli.search);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("m"));
        assert!(cli.ephemeral);
    }
}
