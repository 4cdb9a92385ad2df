//! Presentation-level configuration
//!
//! Resolves how the result is rendered from the CLI flags and the
//! `[output]` section of the config file. Flags win.

use crate::cli::commands::Cli;
use arena_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators on stderr
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Merge CLI flags over file settings.
    pub fn resolve(cli: &Cli, file_format: Option<OutputFormat>, file_color: bool) -> Self {
        Self {
            format: cli.output.or(file_format).unwrap_or_default(),
            color: file_color && !cli.no_color,
            show_progress: !cli.quiet,
        }
    }

    /// Force colors off process-wide when disabled.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
