//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::SlashCommand;
use crate::config::ReplOptions;
use crate::output::transcript::TranscriptRenderer;
use crate::progress::busy::BusyIndicator;
use chatbot_application::{ConversationSession, Reply};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::debug;

/// Interactive chat REPL
pub struct ChatRepl {
    session: Arc<ConversationSession>,
    renderer: TranscriptRenderer,
    indicator: BusyIndicator,
    options: ReplOptions,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(session: Arc<ConversationSession>, options: ReplOptions) -> Self {
        let model = session.model().to_string();
        let indicator = BusyIndicator::new(
            session.subscribe_busy(),
            format!("Waiting for {}...", model),
        )
        .with_enabled(options.show_progress);

        Self {
            renderer: TranscriptRenderer::new(model),
            session,
            indicator,
            options,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.options.resolved_history_file();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    if let Some(command) = SlashCommand::parse(&line) {
                        if self.handle_command(&command) {
                            break;
                        }
                        continue;
                    }

                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }

                    if let Some(reply) = self.process_message(&line).await {
                        println!();
                        println!("{}", self.renderer.render_reply(&reply));
                        println!();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path
            && let Err(e) = rl.save_history(path)
        {
            debug!("Could not save history to {}: {}", path.display(), e);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                Chatbot - Chat               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.session.model());
        println!();
        println!("{}", SlashCommand::HELP);
        println!();
    }

    /// Handle a slash command. Returns true if the REPL should exit.
    fn handle_command(&self, command: &SlashCommand) -> bool {
        match command {
            SlashCommand::Quit => {
                println!("Bye!");
                true
            }
            SlashCommand::Help => {
                println!();
                println!("{}", SlashCommand::HELP);
                println!();
                false
            }
            SlashCommand::History => {
                println!();
                println!("{}", self.renderer.render_history(&self.session.history()));
                println!();
                false
            }
            SlashCommand::Model => {
                println!();
                println!("{}", self.renderer.render_models(self.session.model()));
                println!();
                false
            }
            SlashCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
                false
            }
        }
    }

    /// Send one message, showing the spinner while it is in flight.
    ///
    /// Blank input yields `None` and leaves the conversation untouched.
    pub async fn process_message(&self, text: &str) -> Option<Reply> {
        self.indicator.track(self.session.send_message(text)).await
    }
}
