//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chatbot
#[derive(Parser, Debug)]
#[command(name = "chatbot")]
#[command(author, version, about = "Chat with an OpenAI-compatible model from the terminal")]
#[command(long_about = r#"
Chat with a hosted language model. The whole conversation is resent on every
message; nothing is kept between runs.

The API key is read from OPENAI_API_KEY, or from a .env file in the current
directory.

Configuration files are loaded from (in priority order):
1. CHATBOT_* environment variables (e.g. CHATBOT_MODEL__NAME=gpt-4o)
2. --config <path>     Explicit config file
3. ./chatbot.toml      Project-level config
4. ~/.config/chatbot/config.toml   Global config

Example:
  chatbot
  chatbot -m gpt-4o
  chatbot "Explain ownership in Rust in two sentences"
"#)]
pub struct Cli {
    /// Send this message, print the reply, and exit (omit for interactive chat)
    pub message: Option<String>,

    /// Model to talk to (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Append conversation events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

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
