//! Chat-completion value types.
//!
//! Transport-agnostic shapes of a completion exchange. Adapters map these
//! to and from their wire format.
//!
//! ```text
//! [Turn] ──from_history──▶ CompletionRequest ──▶ (adapter) ──▶ CompletionResponse ──first_content──▶ Option<&str>
//! ```

pub mod message;
pub mod request;
pub mod response;
