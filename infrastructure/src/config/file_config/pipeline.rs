//! Pipeline configuration from TOML (`[pipeline]` section)

use arena_application::{MAX_CONCURRENCY, PipelineParams};
use arena_domain::{ConfigIssue, ConfigIssueCode, GenerationStrategy, ResilienceStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [pipeline]
/// strategy = "fan-out"          # "combined", "batched", "fan-out"
/// resilience = "retry-fallback" # "none", "retry-fallback"
/// max_attempts = 2
/// backoff_ms = 1000
/// call_timeout_secs = 15
/// attempt_timeout_secs = 40     # omit for no limit
/// max_concurrency = 5           # 1..=5, fan-out only
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub strategy: String,
    pub resilience: String,
    pub max_attempts: usize,
    pub backoff_ms: u64,
    pub call_timeout_secs: u64,
    pub attempt_timeout_secs: Option<u64>,
    pub max_concurrency: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let params = PipelineParams::default();
        Self {
            strategy: params.strategy.to_string(),
            resilience: params.resilience.to_string(),
            max_attempts: params.max_attempts,
            backoff_ms: params.backoff.as_millis() as u64,
            call_timeout_secs: params.call_timeout.as_secs(),
            attempt_timeout_secs: None,
            max_concurrency: params.max_concurrency,
        }
    }
}

impl FilePipelineConfig {
    /// Parse strategy string, returning warnings on failure.
    pub fn parse_strategy(&self) -> (GenerationStrategy, Vec<ConfigIssue>) {
        match self.strategy.parse::<GenerationStrategy>() {
            Ok(strategy) => (strategy, vec![]),
            Err(_) => {
                let fallback = GenerationStrategy::default();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "pipeline.strategy".to_string(),
                        value: self.strategy.clone(),
                        valid_values: vec![
                            "combined".to_string(),
                            "batched".to_string(),
                            "fan-out".to_string(),
                        ],
                    },
                    format!(
                        "pipeline.strategy: unknown value '{}', falling back to '{}'",
                        self.strategy, fallback
                    ),
                );
                (fallback, vec![issue])
            }
        }
    }

    /// Parse resilience string, returning warnings on failure.
    pub fn parse_resilience(&self) -> (ResilienceStrategy, Vec<ConfigIssue>) {
        match self.resilience.parse::<ResilienceStrategy>() {
            Ok(resilience) => (resilience, vec![]),
            Err(_) => {
                let fallback = ResilienceStrategy::default();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "pipeline.resilience".to_string(),
                        value: self.resilience.clone(),
                        valid_values: vec!["none".to_string(), "retry-fallback".to_string()],
                    },
                    format!(
                        "pipeline.resilience: unknown value '{}', falling back to '{}'",
                        self.resilience, fallback
                    ),
                );
                (fallback, vec![issue])
            }
        }
    }

    /// Build [`PipelineParams`], resetting invalid values to defaults.
    pub fn parse_params(&self) -> (PipelineParams, Vec<ConfigIssue>) {
        let defaults = PipelineParams::default();
        let (strategy, mut issues) = self.parse_strategy();
        let (resilience, resilience_issues) = self.parse_resilience();
        issues.extend(resilience_issues);

        let max_attempts = if self.max_attempts == 0 {
            issues.push(out_of_range(
                "pipeline.max_attempts",
                self.max_attempts,
                format!(
                    "must be at least 1, falling back to {}",
                    defaults.max_attempts
                ),
            ));
            defaults.max_attempts
        } else {
            self.max_attempts
        };

        let max_concurrency = if (1..=MAX_CONCURRENCY).contains(&self.max_concurrency) {
            self.max_concurrency
        } else {
            issues.push(out_of_range(
                "pipeline.max_concurrency",
                self.max_concurrency,
                format!(
                    "must be within 1..={}, falling back to {}",
                    MAX_CONCURRENCY, defaults.max_concurrency
                ),
            ));
            defaults.max_concurrency
        };

        let call_timeout = if self.call_timeout_secs == 0 {
            issues.push(out_of_range(
                "pipeline.call_timeout_secs",
                self.call_timeout_secs,
                format!(
                    "must be at least 1, falling back to {}",
                    defaults.call_timeout.as_secs()
                ),
            ));
            defaults.call_timeout
        } else {
            Duration::from_secs(self.call_timeout_secs)
        };

        let attempt_timeout = match self.attempt_timeout_secs {
            Some(0) => {
                issues.push(out_of_range(
                    "pipeline.attempt_timeout_secs",
                    0,
                    "must be at least 1, attempts will not be time-limited".to_string(),
                ));
                None
            }
            other => other.map(Duration::from_secs),
        };

        let params = PipelineParams::default()
            .with_strategy(strategy)
            .with_resilience(resilience)
            .with_max_attempts(max_attempts)
            .with_backoff(Duration::from_millis(self.backoff_ms))
            .with_call_timeout(call_timeout)
            .with_attempt_timeout(attempt_timeout)
            .with_max_concurrency(max_concurrency);

        (params, issues)
    }
}

fn out_of_range(field: &str, value: impl std::fmt::Display, detail: String) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        },
        format!("{}: {} {}", field, value, detail),
    )
}
