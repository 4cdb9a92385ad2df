//! Backend conversation types

pub mod entities;
pub mod request;

pub use entities::{Message, Role};
pub use request::{CompletionRequest, GenerationParams, Stage};
