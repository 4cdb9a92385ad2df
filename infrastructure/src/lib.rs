//! Infrastructure layer for debate-arena
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer:
//!
//! - [`OpenAiGateway`]: [`LlmGateway`](arena_application::LlmGateway) over an
//!   OpenAI-compatible chat-completions endpoint
//! - [`ConfigLoader`]: layered TOML and environment configuration

pub mod config;
pub mod openai;

pub use config::{ConfigLoader, FileBackendConfig, FileConfig, FileOutputConfig, FilePipelineConfig};
pub use openai::{OpenAiError, OpenAiGateway};
