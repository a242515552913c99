//! Chat messages as the completion API sees them

use crate::conversation::turn::{Speaker, Turn};
use serde::{Deserialize, Serialize};

/// Role of a message in a completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl From<Speaker> for ChatRole {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => ChatRole::User,
            Speaker::Assistant => ChatRole::Assistant,
        }
    }
}

impl From<ChatRole> for Speaker {
    fn from(role: ChatRole) -> Self {
        match role {
            ChatRole::User => Speaker::User,
            ChatRole::Assistant => Speaker::Assistant,
        }
    }
}

/// A `{role, content}` entry of a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Rebuild a turn from this message. The timestamp is fresh.
    pub fn to_turn(&self) -> Turn {
        Turn::new(self.role.into(), self.content.clone())
    }
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        Self::new(turn.speaker().into(), turn.content())
    }
}
