//! Conversation turn entities

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a conversation (Value Object)
///
/// Fields are private: a turn cannot change after it is created.
/// `created_at` is for display and tie-breaking only, log position is
/// the authoritative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    content: String,
    speaker: Speaker,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            speaker,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    /// Create a user turn, rejecting empty or whitespace-only content.
    ///
    /// The content is kept verbatim; trimming only decides blankness.
    pub fn try_user(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::BlankContent);
        }
        Ok(Self::user(content))
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
