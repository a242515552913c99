//! Application layer for chatbot
//!
//! This crate contains the conversation session, its observable state, and
//! the port definitions adapters implement. It depends only on the domain
//! layer.

pub mod ports;
pub mod store;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    completion::{CompletionClient, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, EventKind},
};
pub use store::{BusyGuard, History, MessageStore, StatusFlag};
pub use use_cases::conversation::{
    ConversationSession, ERROR_PREFIX, NO_RESPONSE_PLACEHOLDER, Reply, ReplyOutcome,
    UNKNOWN_ERROR, error_turn_content,
};
