//! Output format value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for pipeline results
///
/// Only `Json` is meant for machine consumers; the other two are for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact single-line JSON (default)
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Colored human-readable summary
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid OutputFormat: {}", s)),
        }
    }
}
