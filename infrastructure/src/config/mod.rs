//! Configuration file loading for chatbot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CHATBOT_*` environment variables (`CHATBOT_MODEL__NAME=gpt-4o`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./chatbot.toml` or `./.chatbot.toml`
//! 4. Global: `$XDG_CONFIG_HOME/chatbot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileLoggingConfig, FileModelConfig,
    FileReplConfig,
};
pub use loader::ConfigLoader;
