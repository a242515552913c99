//! Completion response

use serde::{Deserialize, Serialize};

/// Message payload of a returned choice. Content may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

/// Result of a completion call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Single-choice response carrying `content`.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::from_content(Some(content.into()))
    }

    /// Single-choice response whose content may be missing.
    pub fn from_content(content: Option<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: ChoiceMessage { content },
            }],
        }
    }

    /// Content of the first choice, if it carries usable text.
    ///
    /// No choices, a null content, and an empty string all count as no
    /// content. An empty `choices` array is therefore an empty reply, not a
    /// failed request: the session records the placeholder, not an error turn.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|s| !s.is_empty())
    }
}
