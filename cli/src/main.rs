//! CLI entrypoint for chatbot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chatbot_application::{ConversationLogger, ConversationSession};
use chatbot_domain::Model;
use chatbot_infrastructure::{
    ConfigLoader, Credentials, FileConfig, JsonlConversationLogger, OpenAiClient, OpenAiConfig,
};
use chatbot_presentation::{BusyIndicator, ChatRepl, Cli, ReplOptions, TranscriptRenderer};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        info!("Configuration files disabled (--no-config)");
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    let config = apply_overrides(config, &cli)?;
    config.validate().context("Invalid configuration")?;

    if cli.no_color || !config.repl.color {
        colored::control::set_override(false);
    }

    info!("Starting chatbot with model {}", config.model.name);

    // === Dependency Injection ===
    let credentials = Credentials::load()?;
    let client = OpenAiClient::new(
        OpenAiConfig::new(credentials.api_key())
            .with_base_url(config.api.base_url.clone())
            .with_timeout(config.api.timeout_seconds.map(Duration::from_secs)),
    )?;

    let mut session = ConversationSession::new(Arc::new(client), config.model.name.clone());
    if let Some(logger) = transcript_logger(&cli, &config) {
        session = session.with_conversation_logger(logger);
    }
    let session = Arc::new(session);

    let show_progress = config.repl.show_progress && !cli.quiet;

    // One-shot mode
    if let Some(message) = cli.message.as_deref() {
        return one_shot(&session, message, show_progress).await;
    }

    let repl = ChatRepl::new(
        session,
        ReplOptions {
            show_progress,
            history_file: config.repl.history_file.map(PathBuf::from),
        },
    );
    repl.run().await?;

    Ok(ExitCode::SUCCESS)
}

/// Layer CLI flags over the loaded configuration
fn apply_overrides(mut config: FileConfig, cli: &Cli) -> Result<FileConfig> {
    if let Some(model) = &cli.model {
        config.model.name = model
            .parse::<Model>()
            .with_context(|| format!("Invalid --model value '{}'", model))?;
    }
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_seconds = Some(timeout);
    }
    Ok(config)
}

fn transcript_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = cli
        .transcript
        .clone()
        .or_else(|| config.logging.transcript_file.as_ref().map(PathBuf::from))?;

    match JsonlConversationLogger::open(&path) {
        Some(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Some(Arc::new(logger))
        }
        None => {
            warn!("Transcript disabled; could not open {}", path.display());
            None
        }
    }
}

async fn one_shot(
    session: &ConversationSession,
    message: &str,
    show_progress: bool,
) -> Result<ExitCode> {
    let indicator = BusyIndicator::new(
        session.subscribe_busy(),
        format!("Waiting for {}...", session.model()),
    )
    .with_enabled(show_progress);

    let Some(reply) = indicator.track(session.send_message(message)).await else {
        bail!("Message is empty");
    };

    if reply.is_failure() {
        let renderer = TranscriptRenderer::new(session.model().to_string());
        eprintln!("{}", renderer.render_reply(&reply));
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", reply.turn.content());
    Ok(ExitCode::SUCCESS)
}
