//! Pipeline strategy axes.
//!
//! Two independent choices shape a run:
//!
//! | Axis | Values | Default |
//! |------|--------|---------|
//! | [`GenerationStrategy`] | `combined`, `batched`, `fan-out` | `batched` |
//! | [`ResilienceStrategy`] | `none`, `retry-fallback` | `retry-fallback` |
//!
//! Every combination yields the same result shape; they differ in the
//! number of backend calls and in how failures surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How backend calls are laid out within one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStrategy {
    /// One call returns title, positions and every opinion
    Combined,
    /// Staged: title, positions, then all opinions in one call
    #[default]
    Batched,
    /// Staged: title, positions, then one concurrent call per persona
    FanOut,
}

impl GenerationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStrategy::Combined => "combined",
            GenerationStrategy::Batched => "batched",
            GenerationStrategy::FanOut => "fan-out",
        }
    }

    /// Get a human-readable description of this strategy
    pub fn description(&self) -> &'static str {
        match self {
            GenerationStrategy::Combined => "Combined: a single backend call",
            GenerationStrategy::Batched => "Batched: staged calls, opinions in one request",
            GenerationStrategy::FanOut => "Fan-out: staged calls, one request per persona",
        }
    }

    /// Whether topic normalization and position generation run as
    /// separate stages
    pub fn is_staged(&self) -> bool {
        !matches!(self, GenerationStrategy::Combined)
    }
}

impl fmt::Display for GenerationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GenerationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "combined" | "single" => Ok(GenerationStrategy::Combined),
            "batched" | "batch" => Ok(GenerationStrategy::Batched),
            "fan-out" | "fanout" | "fan_out" => Ok(GenerationStrategy::FanOut),
            _ => Err(format!("Invalid GenerationStrategy: {}", s)),
        }
    }
}

/// What happens when an attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResilienceStrategy {
    /// One attempt; its failure is returned to the caller
    None,
    /// Bounded retries, then the deterministic fallback result
    #[default]
    RetryFallback,
}

impl ResilienceStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResilienceStrategy::None => "none",
            ResilienceStrategy::RetryFallback => "retry-fallback",
        }
    }

    /// Whether failures end in the fallback result instead of an error
    pub fn falls_back(&self) -> bool {
        matches!(self, ResilienceStrategy::RetryFallback)
    }
}

impl fmt::Display for ResilienceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResilienceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(ResilienceStrategy::None),
            "retry-fallback" | "retry_fallback" | "retry" => Ok(ResilienceStrategy::RetryFallback),
            _ => Err(format!("Invalid ResilienceStrategy: {}", s)),
        }
    }
}
