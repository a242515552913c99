//! Presentation-level configuration
//!
//! Options for REPL behavior, resolved by the binary from config files and
//! CLI flags.

use std::path::PathBuf;

/// REPL options for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Show the spinner while a request is in flight
    pub show_progress: bool,
    /// Line-editor history file; `None` uses the default location
    pub history_file: Option<PathBuf>,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplOptions {
    /// History file to use: the configured one, else `<data dir>/chatbot/history.txt`
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("chatbot").join("history.txt")))
    }
}
