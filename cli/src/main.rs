//! CLI entrypoint for chatgate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chatgate_application::{
    ConversationLogger, Session, SessionConfig, SummarizeConversationUseCase, TurnController,
};
use chatgate_domain::PromptStyle;
use chatgate_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, build_gateway};
use chatgate_presentation::{ChatRepl, Cli, ReplConfig};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{Subscriber, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(&cli, config.logging.file.as_deref())?;

    info!("Starting chatgate");

    // === Dependency Injection ===
    let session_config = config.to_session_config()?;
    let session = Session::new(session_config.clone())?;
    let gateway = build_gateway(&config.providers, &config.providers.default)?;
    let mut controller = TurnController::new(session, gateway)?;

    let conversation_logger: Option<Arc<dyn ConversationLogger>> = config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::new)
        .map(|logger| {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger) as Arc<dyn ConversationLogger>
        });
    if let Some(logger) = &conversation_logger {
        controller = controller.with_conversation_logger(logger.clone());
    }

    let mut repl = ChatRepl::new(Arc::new(controller)).with_config(ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config.repl.history_file.clone(),
        color: config.repl.color,
    });
    if let Some(summarizer) = build_summarizer(&config, &session_config, conversation_logger)? {
        repl = repl.with_summarizer(summarizer);
    }

    repl.run().await?;

    Ok(())
}

/// Load the merged config. Tracing is not installed yet, so a scoped
/// stderr subscriber picks up the loader's source discovery.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let subscriber = console_subscriber(env_filter(cli));
    tracing::subscriber::with_default(subscriber, || -> Result<FileConfig> {
        let mut config = if cli.no_config {
            ConfigLoader::load_defaults()
        } else {
            ConfigLoader::load(cli.config.as_deref())?
        };
        apply_cli_overrides(cli, &mut config);
        Ok(config)
    })
}

/// Command-line flags win over every config source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(provider) = &cli.provider {
        config.providers.default = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.generation.model = Some(model.clone());
    }
    if let Some(provider) = &cli.summary_provider {
        config.providers.summary = Some(provider.clone());
    }
    if let Some(max_words) = cli.brief {
        config.session.prompt = PromptStyle::Brief { max_words };
    }
    if let Some(path) = &cli.conversation_log {
        config.logging.conversation_log = Some(path.display().to_string());
    }
    if cli.quiet {
        config.repl.show_progress = false;
    }
    if cli.no_color {
        config.repl.color = false;
    }
}

/// `RUST_LOG` overrides `-v`.
fn env_filter(cli: &Cli) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()))
}

fn console_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
}

/// Initialize logging based on verbosity level
fn init_tracing(cli: &Cli, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(cli);

    let Some(log_file) = log_file else {
        console_subscriber(filter).init();
        return Ok(None);
    };

    let path = Path::new(log_file);
    let Some(file_name) = path.file_name() else {
        bail!("Invalid log file path: {}", log_file);
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// The `/end` summarizer. A summary provider without credentials only
/// disables `/end`; it never blocks the chat.
fn build_summarizer(
    config: &FileConfig,
    session_config: &SessionConfig,
    conversation_logger: Option<Arc<dyn ConversationLogger>>,
) -> Result<Option<SummarizeConversationUseCase>> {
    let provider = config.providers.summary_provider();
    let gateway = build_gateway(&config.providers, provider)?;

    if let Err(e) = gateway.verify_credentials() {
        warn!("Summaries disabled: {}", e);
        return Ok(None);
    }

    let generation = config.generation_for(provider)?;
    let mut summarizer = SummarizeConversationUseCase::new(gateway, generation)
        .with_retry(session_config.retry.clone())
        .with_timeout(session_config.request_timeout);
    if let Some(logger) = conversation_logger {
        summarizer = summarizer.with_conversation_logger(logger);
    }

    Ok(Some(summarizer))
}
