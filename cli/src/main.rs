//! CLI entrypoint for streamchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use streamchat_application::ChatController;
use streamchat_domain::Conversation;
use streamchat_infrastructure::{ConfigLoader, FileConfig, HttpChatTransport, JsonlConversationLogger};
use streamchat_presentation::chat::send_interruptible;
use streamchat_presentation::{ChatRepl, Cli, ReplConfig};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    apply_cli_overrides(&mut config, &cli);

    // Held until exit so buffered log lines reach the file
    let _log_guard = init_tracing(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting streamchat");

    for issue in config.validate() {
        warn!("Configuration issue: {}", issue);
        eprintln!("Warning: {}", issue);
    }

    // === Dependency Injection ===
    let connect_timeout =
        Some(Duration::from_secs(config.server.connect_timeout_secs)).filter(|t| !t.is_zero());
    let transport = HttpChatTransport::with_settings(
        &config.server.base_url,
        &config.server.chat_path,
        connect_timeout,
    )
    .with_context(|| format!("Invalid server address '{}'", config.server.base_url))?;
    let endpoint = transport.endpoint().to_string();
    info!("Chat endpoint: {}", endpoint);

    let conversation = Conversation::new(config.chat.system_prompt_or_default());
    let mut controller = ChatController::new(Arc::new(transport), conversation);
    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!(
            "Conversation log: {} (session {})",
            logger.path().display(),
            logger.session()
        );
        controller = controller.with_conversation_logger(Arc::new(logger));
    }
    let controller = Arc::new(controller);

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.repl.history_file.clone(),
    };

    // Single message mode
    if let Some(message) = cli.message {
        let report = send_interruptible(&controller, &message, repl_config.show_progress).await?;
        return Ok(if report.error.is_none() && !report.cancelled {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    ChatRepl::new(controller, repl_config)
        .with_server(endpoint)
        .run()
        .await?;

    Ok(ExitCode::SUCCESS)
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(prompt) = &cli.system_prompt {
        config.chat.system_prompt = Some(prompt.clone());
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
fn init_tracing(verbose: u8, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
    }
}
