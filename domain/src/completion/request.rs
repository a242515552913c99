//! Completion request

use super::message::ChatMessage;
use crate::conversation::turn::Turn;
use crate::core::model::Model;
use serde::Serialize;

/// One completion call: a model and the full ordered message list.
///
/// No server-side conversation state is assumed, so every request carries
/// the entire history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<ChatMessage>) -> Self {
        Self { model, messages }
    }

    /// Translate a chronological history into a request.
    pub fn from_history(model: Model, history: &[Turn]) -> Self {
        Self::new(model, history.iter().map(ChatMessage::from).collect())
    }
}
