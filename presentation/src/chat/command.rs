//! Slash commands understood by the REPL

/// A parsed `/command` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    History,
    Model,
    Quit,
    Unknown(String),
}

impl SlashCommand {
    /// Parse a line as a command. Returns `None` for ordinary messages.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }

        let name = line.split_whitespace().next().unwrap_or(line);
        Some(match name {
            "/help" | "/h" | "/?" => Self::Help,
            "/history" => Self::History,
            "/model" => Self::Model,
            "/quit" | "/exit" | "/q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        })
    }

    pub const HELP: &'static str = "\
Commands:
  /help, /h, /?     - Show this help
  /history          - Show the conversation so far
  /model            - List known models, marking the one in use
  /quit, /exit, /q  - Exit chat";
}
