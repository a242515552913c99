//! Infrastructure layer for chatbot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and credential loading.

pub mod config;
pub mod credentials;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileLoggingConfig,
    FileModelConfig, FileReplConfig,
};
pub use credentials::{API_KEY_VAR, CredentialError, Credentials};
pub use logging::JsonlConversationLogger;
pub use openai::{OPENAI_API_BASE, OpenAiClient, OpenAiConfig};
