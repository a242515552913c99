//! Wire format of the chat-completions endpoint

use chatbot_domain::{Choice, ChoiceMessage, CompletionRequest, CompletionResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a CompletionRequest> for WireRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: request.model.as_str(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    pub choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoice {
    pub message: Option<WireChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl From<WireResponse> for CompletionResponse {
    fn from(wire: WireResponse) -> Self {
        Self {
            choices: wire
                .choices
                .into_iter()
                .map(|c| Choice {
                    message: ChoiceMessage {
                        content: c.message.and_then(|m| m.content),
                    },
                })
                .collect(),
        }
    }
}

/// `{"error": {"message": "...", "type": "..."}}` as returned on failure
#[derive(Debug, Deserialize)]
pub(crate) struct WireErrorBody {
    pub error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireErrorDetail {
    #[serde(default)]
    pub message: String,
}

impl WireErrorBody {
    /// Extract `error.message` from a response body, if it has one.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<WireErrorBody>(body)
            .ok()
            .map(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
    }
}
