//! Error types for the OpenAI-compatible adapter

use arena_application::GatewayError;
use thiserror::Error;

/// Longest error body kept in [`GatewayError::RequestFailed`].
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 500;

/// Result type alias for chat-completions operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("No API key configured (set {0})")]
    MissingApiKey(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response contained no choices")]
    NoChoices,

    #[error("First choice has no text content")]
    NoContent,
}

impl OpenAiError {
    /// Build a status error, clipping long bodies.
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let body = if body.chars().count() > MAX_ERROR_BODY_CHARS {
            let clipped: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            format!("{}...", clipped)
        } else {
            body.to_string()
        };
        OpenAiError::Status { status, body }
    }
}

impl From<OpenAiError> for GatewayError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::MissingApiKey(env) => {
                GatewayError::Unauthorized(format!("no API key configured (set {})", env))
            }
            OpenAiError::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Transport(e) if e.is_connect() => {
                GatewayError::ConnectionError(e.to_string())
            }
            OpenAiError::Transport(e) if e.is_decode() => {
                GatewayError::InvalidResponse(e.to_string())
            }
            OpenAiError::Transport(e) => GatewayError::Other(e.to_string()),
            OpenAiError::Status { status: 429, .. } => GatewayError::RateLimited,
            OpenAiError::Status {
                status: status @ (401 | 403),
                body,
            } => GatewayError::Unauthorized(format!("HTTP {}: {}", status, body)),
            OpenAiError::Status { status, body } => GatewayError::RequestFailed { status, body },
            OpenAiError::Decode(e) => GatewayError::InvalidResponse(e.to_string()),
            OpenAiError::NoChoices => GatewayError::InvalidResponse("no choices".to_string()),
            OpenAiError::NoContent => GatewayError::InvalidResponse("no content".to_string()),
        }
    }
}
