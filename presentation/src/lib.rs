//! Presentation layer for debate-arena
//!
//! This crate contains the CLI definition, output formatters and
//! progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
