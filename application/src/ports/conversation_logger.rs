//! Transcript port.
//!
//! Sessions report what was said to a [`ConversationLogger`], which keeps a
//! machine-readable record apart from the `tracing` diagnostics. Sessions
//! without a logger skip this entirely.

use serde_json::Value;

/// What happened in a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserMessage,
    AssistantResponse,
    CompletionError,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserMessage => "user_message",
            EventKind::AssistantResponse => "assistant_response",
            EventKind::CompletionError => "completion_error",
        }
    }
}

/// One transcript entry: its kind plus free-form JSON details
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    pub kind: EventKind,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for transcript entries. Never fails from the caller's point of view.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::UserMessage.as_str(), "user_message");
        assert_eq!(EventKind::AssistantResponse.as_str(), "assistant_response");
        assert_eq!(EventKind::CompletionError.as_str(), "completion_error");
    }
}
