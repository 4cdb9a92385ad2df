//! LLM Gateway port
//!
//! Defines the interface for communicating with text-generation backends.

use async_trait::async_trait;
use arena_domain::CompletionRequest;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with backends.
/// Implementations (adapters) live in the infrastructure layer.
///
/// One call is one request/response exchange; the returned string is the
/// text of the first completion. Implementations should honour
/// `request.timeout`, but callers enforce it independently.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
