//! OpenAI-compatible chat-completion adapter.
//!
//! Implements the [`CompletionClient`](chatbot_application::CompletionClient)
//! port over HTTP:
//!
//! ```text
//! POST {base_url}/chat/completions
//! Authorization: Bearer <api key>
//! {"model": "...", "messages": [{"role": "user", "content": "..."}, ...]}
//! ```
//!
//! Any server speaking this shape works; point `base_url` at it.

pub mod client;
mod wire;

pub use client::{OPENAI_API_BASE, OpenAiClient, OpenAiConfig};
