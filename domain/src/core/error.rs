//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("Invalid stance: {0}")]
    InvalidStance(String),
}
