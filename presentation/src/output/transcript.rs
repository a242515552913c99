//! Renders conversation turns for the terminal

use chatbot_application::{Reply, ReplyOutcome};
use chatbot_domain::{Model, Speaker, Turn};
use chrono::Local;
use colored::Colorize;

/// Formats turns as a labelled, indented transcript.
///
/// User turns are labelled `you`; assistant turns carry the model name.
/// Color is controlled globally through `colored::control`.
pub struct TranscriptRenderer {
    assistant_label: String,
}

impl TranscriptRenderer {
    pub fn new(assistant_label: impl Into<String>) -> Self {
        Self {
            assistant_label: assistant_label.into(),
        }
    }

    /// Render one turn from the history
    pub fn render_turn(&self, turn: &Turn) -> String {
        let body = indent(turn.content());
        format!("{}\n{}", self.header(turn), body)
    }

    /// Render the reply to a message just sent, styled by how it settled
    pub fn render_reply(&self, reply: &Reply) -> String {
        let body = indent(reply.turn.content());
        let body = match reply.outcome {
            ReplyOutcome::Answered => body,
            ReplyOutcome::Empty => body.dimmed().italic().to_string(),
            ReplyOutcome::Failed => body.red().to_string(),
        };
        format!("{}\n{}", self.header(&reply.turn), body)
    }

    /// Render the whole history, or a note when it is empty
    pub fn render_history(&self, history: &[Turn]) -> String {
        if history.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }
        history
            .iter()
            .map(|turn| self.render_turn(turn))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// List the known models, marking the one in use.
    ///
    /// A custom model is appended after the known ones.
    pub fn render_models(&self, current: &Model) -> String {
        let mut models = Model::known_models();
        if current.is_custom() {
            models.push(current.clone());
        }

        let mut lines = vec!["Models:".to_string()];
        for model in &models {
            let suffix = if model.is_custom() { " (custom)" } else { "" };
            let line = format!("{}{}", model, suffix);
            if model == current {
                lines.push(format!("  * {}", line.green().bold()));
            } else {
                lines.push(format!("    {}", line));
            }
        }
        lines.join("\n")
    }

    fn header(&self, turn: &Turn) -> String {
        let time = turn
            .created_at()
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        let label = match turn.speaker() {
            Speaker::User => "you".green().bold(),
            Speaker::Assistant => self.assistant_label.as_str().cyan().bold(),
        };
        format!("{} {}", time.dimmed(), label)
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TranscriptRenderer {
        colored::control::set_override(false);
        TranscriptRenderer::new("gpt-3.5-turbo")
    }

    #[test]
    fn test_user_turn_is_labelled_you() {
        let rendered = plain().render_turn(&Turn::user("Hello"));
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().ends_with(" you"));
        assert_eq!(lines.next(), Some("  Hello"));
    }

    #[test]
    fn test_assistant_turn_is_labelled_with_model() {
        let rendered = plain().render_turn(&Turn::assistant("line one\nline two"));
        let lines: Vec<_> = rendered.lines().collect();
        assert!(lines[0].ends_with(" gpt-3.5-turbo"));
        assert_eq!(&lines[1..], &["  line one", "  line two"]);
    }

    #[test]
    fn test_failed_reply_keeps_error_text() {
        let reply = Reply {
            turn: Turn::assistant("Error: Request timed out"),
            outcome: ReplyOutcome::Failed,
        };
        assert!(plain().render_reply(&reply).contains("  Error: Request timed out"));
    }

    #[test]
    fn test_model_listing_marks_current() {
        let rendered = plain().render_models(&Model::Gpt4o);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "Models:");
        assert_eq!(lines.len(), Model::known_models().len() + 1);
        assert!(lines.contains(&"  * gpt-4o"));
        assert!(lines.contains(&"    gpt-3.5-turbo"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("  *")).count(), 1);
    }

    #[test]
    fn test_model_listing_appends_custom_model() {
        let current = Model::Custom("my-finetune-v1".to_string());
        let rendered = plain().render_models(&current);

        assert_eq!(rendered.lines().last(), Some("  * my-finetune-v1 (custom)"));
        assert!(rendered.contains("    gpt-4o\n"));
    }

    #[test]
    fn test_history_rendering() {
        let renderer = plain();
        assert_eq!(renderer.render_history(&[]), "(no messages yet)");

        let rendered =
            renderer.render_history(&[Turn::user("Hello"), Turn::assistant("Hi there!")]);
        assert_eq!(rendered.split("\n\n").count(), 2);
        assert!(rendered.contains("  Hi there!"));
    }
}
