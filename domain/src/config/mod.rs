//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
pub mod strategy;
pub mod validation;

pub use output_format::OutputFormat;
pub use strategy::{GenerationStrategy, ResilienceStrategy};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
