//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message content cannot be blank")]
    BlankContent,

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}
