//! Presentation layer for chatbot
//!
//! This crate contains CLI definitions, transcript rendering, the busy
//! spinner, and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::command::SlashCommand;
pub use chat::repl::ChatRepl;
pub use cli::commands::Cli;
pub use config::ReplOptions;
pub use output::transcript::TranscriptRenderer;
pub use progress::busy::BusyIndicator;
