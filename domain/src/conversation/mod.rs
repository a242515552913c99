//! Conversation domain.
//!
//! - [`turn::Turn`]: one immutable message in the conversation
//! - [`turn::Speaker`]: who produced a turn

pub mod turn;
