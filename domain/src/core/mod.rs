//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the chat model a conversation talks to
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers for log previews

pub mod error;
pub mod model;
pub mod string;
