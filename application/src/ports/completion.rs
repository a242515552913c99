//! Completion client port
//!
//! Defines the interface for calling a chat-completion API.

use async_trait::async_trait;
use chatbot_domain::{CompletionRequest, CompletionResponse};
use thiserror::Error;

/// Errors that can occur during a completion call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl GatewayError {
    /// Human-readable description of the failure, if the error carries one.
    ///
    /// A timeout and an empty `Other` carry nothing beyond their kind and
    /// return `None`.
    pub fn description(&self) -> Option<String> {
        match self {
            GatewayError::Timeout => None,
            GatewayError::Other(message) if message.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

/// Client for a chat-completion API
///
/// This port defines how the application layer reaches the remote model.
/// Implementations (adapters) live in the infrastructure layer. One call
/// is one attempt: implementations must not retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the request and return the raw response
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, GatewayError>;
}
