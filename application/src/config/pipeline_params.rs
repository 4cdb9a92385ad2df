//! Pipeline parameters: attempt loop and concurrency control.
//!
//! [`PipelineParams`] groups the static parameters that control the retry
//! loop in [`RunPipelineUseCase`](crate::use_cases::run_pipeline::RunPipelineUseCase).
//! These are application-layer concerns, not domain policy.

use arena_domain::{GenerationStrategy, ResilienceStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on concurrent backend calls during fan-out.
pub const MAX_CONCURRENCY: usize = 5;

/// Attempt loop control parameters.
///
/// | Field | Default |
/// |-------|---------|
/// | `strategy` | batched |
/// | `resilience` | retry-fallback |
/// | `max_attempts` | 2 |
/// | `backoff` | 1s |
/// | `call_timeout` | 15s |
/// | `attempt_timeout` | none |
/// | `max_concurrency` | 5 |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Layout of backend calls within one attempt.
    pub strategy: GenerationStrategy,
    /// Retry and fallback behavior.
    pub resilience: ResilienceStrategy,
    /// Attempts before falling back. Ignored when resilience is `none`.
    pub max_attempts: usize,
    /// Fixed delay between attempts.
    pub backoff: Duration,
    /// Wall-clock limit for a single backend call.
    pub call_timeout: Duration,
    /// Wall-clock limit for a whole attempt.
    pub attempt_timeout: Option<Duration>,
    /// Concurrent persona calls during fan-out, within `1..=MAX_CONCURRENCY`.
    pub max_concurrency: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            strategy: GenerationStrategy::default(),
            resilience: ResilienceStrategy::default(),
            max_attempts: 2,
            backoff: Duration::from_secs(1),
            call_timeout: Duration::from_secs(15),
            attempt_timeout: None,
            max_concurrency: MAX_CONCURRENCY,
        }
    }
}

impl PipelineParams {
    /// Attempts the controller will actually make.
    pub fn effective_attempts(&self) -> usize {
        if self.resilience.falls_back() {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_resilience(mut self, resilience: ResilienceStrategy) -> Self {
        self.resilience = resilience;
        self
    }

    pub fn with_max_attempts(mut self, max: usize) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Set the fan-out limit, clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.clamp(1, MAX_CONCURRENCY);
        self
    }
}
