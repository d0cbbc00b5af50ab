//! CLI entrypoint for search-relay
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use relay_application::{
    BoundedRetry, DecisionEvaluator, InMemorySettingsStore, KeywordResubmitter,
    OutboundInterceptor, ResponseWatcher, SearchWorkflow, SettingsStore, SettingsUseCase,
    ToggleOutcome, ToggleSearchUseCase, WebSearchUseCase,
};
use relay_infrastructure::{
    ConfigLoader, ExaSearchProvider, LatexShorthandTransform, OpenAiChatTransport,
    TomlSettingsStore,
};
use relay_presentation::{ChatHost, Cli, ConsoleUi, SearchCommands, TerminalSurface};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "search-relay.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let settings: Arc<dyn SettingsStore> = if cli.ephemeral {
        Arc::new(InMemorySettingsStore::new())
    } else {
        let path = config
            .settings
            .path
            .clone()
            .or_else(ConfigLoader::default_settings_path)
            .context("No config directory for the settings file; run with --ephemeral")?;
        Arc::new(TomlSettingsStore::open(path).context("Failed to open settings")?)
    };

    let debug = SettingsUseCase::new(Arc::clone(&settings)).debug_enabled();
    let _log_guard = init_logging(&cli, debug);

    info!("Starting search-relay");

    // === Dependency Injection ===
    let params = config.workflow_params();
    let ui = Arc::new(ConsoleUi::new().with_color(!cli.no_color));
    let workflow = Arc::new(
        SearchWorkflow::new(false, ui.clone()).with_decision_timeout(params.decision_timeout),
    );

    // Host surfaces the driver types into
    let (surface, commands) = TerminalSurface::new();
    let resubmitter = Arc::new(KeywordResubmitter::new(
        surface.clone(),
        workflow.clone(),
        BoundedRetry::new(params.submit_attempts, params.submit_interval),
        params.submit_initial_delay,
    ));
    let evaluator = Arc::new(DecisionEvaluator::new(workflow.clone(), resubmitter));
    let watcher = Arc::new(ResponseWatcher::new(evaluator, params.debounce));

    // Search
    let transform = Arc::new(LatexShorthandTransform::new().context("Invalid text rules")?);
    let client = reqwest::Client::new();
    let provider =
        Arc::new(ExaSearchProvider::new(client.clone()).with_endpoint(config.search.endpoint.clone()));
    let search = WebSearchUseCase::new(provider, settings.clone(), ui.clone())
        .with_transform(transform.clone())
        .with_timeout(params.search_timeout);

    // Chat transport, wrapped by the interceptor
    let endpoint = cli
        .endpoint
        .clone()
        .unwrap_or_else(|| config.chat.endpoint.clone());
    let api_key = config.chat.api_key();
    if api_key.is_none() {
        warn!("{} is not set; chat requests are sent without a key", config.chat.api_key_env);
    }
    let chat = Arc::new(OpenAiChatTransport::new(client, endpoint).with_api_key(api_key));
    let interceptor = Arc::new(OutboundInterceptor::new(chat, workflow.clone(), search));

    let toggle = ToggleSearchUseCase::new(workflow.clone(), settings.clone(), ui.clone());
    if cli.search && toggle.set_armed(true) == ToggleOutcome::CredentialRequired {
        ui.info("Search stays off until an Exa API key is saved with /key");
    }
    let extension = Arc::new(SearchCommands::new(
        toggle,
        SettingsUseCase::new(settings),
        workflow,
        ui.clone(),
    ));

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| config.chat.model.clone());
    let mut host = ChatHost::new(interceptor, surface, commands, ui, model)
        .with_observer(watcher)
        .with_transform(transform)
        .with_extension(extension);

    host.run()
        .await
        .map_err(|e| anyhow!("Line editor failed: {}", e))?;
    Ok(())
}

/// Initialize logging based on verbosity level and the debug setting.
///
/// Logs go to a daily file under the data directory unless `--log-stderr`
/// is given, so they never interleave with the chat.
fn init_logging(cli: &Cli, debug: bool) -> Option<WorkerGuard> {
    let verbosity = if debug { cli.verbose.max(2) } else { cli.verbose };
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let log_dir = ConfigLoader::log_dir().filter(|_| !cli.log_stderr);
    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
