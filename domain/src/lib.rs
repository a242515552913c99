//! Domain layer for chatbot
//!
//! This crate contains the conversation entities and the value types of a
//! chat-completion exchange. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn
//!
//! One immutable message in the conversation, tagged by [`Speaker`].
//! A conversation is an append-only sequence of turns.
//!
//! ## Completion
//!
//! The request/response shapes exchanged with a completion API. The full
//! history is translated into a [`CompletionRequest`] on every call.

pub mod completion;
pub mod conversation;
pub mod core;

// Re-export commonly used types
pub use completion::{
    message::{ChatMessage, ChatRole},
    request::CompletionRequest,
    response::{Choice, ChoiceMessage, CompletionResponse},
};
pub use conversation::turn::{Speaker, Turn};
pub use core::{error::DomainError, model::Model, string::preview};
