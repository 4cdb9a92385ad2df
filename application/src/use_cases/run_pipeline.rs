//! Run Pipeline use case
//!
//! Drives one topic through the stages in a bounded retry loop and
//! assembles the uniform [`PipelineResult`].
//!
//! # Attempt flow
//!
//! ```text
//! attempt = normalize → stances → opinions → repair → assemble
//!           (or one combined call → repair → assemble)
//!
//! for attempt in 1..=max_attempts:
//!     Ok       → Generated
//!     Err      → backoff, retry
//!     Cancel   → stop
//! exhausted / cancelled → fallback (retry-fallback) or error (none)
//! ```
//!
//! Every failure inside an attempt counts the same toward the retry
//! budget; [`FailureKind`](crate::use_cases::shared::FailureKind) only
//! feeds diagnostics.

use crate::config::PipelineConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::assign_opinions::AssignOpinionsUseCase;
use crate::use_cases::generate_stances::GenerateStancesUseCase;
use crate::use_cases::normalize_topic::NormalizeTopicUseCase;
use crate::use_cases::shared::{AttemptError, BackendCaller, report_single};
use arena_domain::{
    CombinedPayload, GenerationStrategy, NormalizedTopic, Opinion, PersonaCatalog,
    PipelineResult, PositionPair, PromptTemplate, Stage, Topic, fallback_result, repair_sides,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a pipeline run
#[derive(Error, Debug)]
pub enum RunPipelineError {
    /// The single attempt failed (resilience `none`).
    #[error("Attempt failed: {0}")]
    AttemptFailed(AttemptError),

    /// Every attempt failed. Only reported through
    /// [`ProgressNotifier::on_fallback`]; callers receive the fallback.
    #[error("All {attempts} attempts failed, last error: {last}")]
    ExhaustedRetries { attempts: usize, last: AttemptError },

    #[error("Operation cancelled")]
    Cancelled,
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Generated,
    Fallback,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Generated => "generated",
            ResultSource::Fallback => "fallback",
        }
    }
}

/// Output of [`RunPipelineUseCase`].
///
/// Only `result` is the primary payload; `source` and `attempts` are
/// diagnostics.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub result: PipelineResult,
    pub source: ResultSource,
    /// Attempts actually started
    pub attempts: usize,
}

/// Use case for turning a topic into a stance set
pub struct RunPipelineUseCase {
    gateway: Arc<dyn LlmGateway>,
    catalog: PersonaCatalog,
    config: PipelineConfig,
    cancellation_token: Option<CancellationToken>,
}

impl RunPipelineUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: PipelineConfig) -> Self {
        Self {
            gateway,
            catalog: PersonaCatalog::philosophers(),
            config,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, topic: &Topic) -> Result<PipelineOutput, RunPipelineError> {
        self.execute_with_progress(topic, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// With resilience `retry-fallback` this never returns `Err`.
    pub async fn execute_with_progress(
        &self,
        topic: &Topic,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineOutput, RunPipelineError> {
        let params = self.config.params();
        let max_attempts = params.effective_attempts();

        info!(
            strategy = %params.strategy,
            resilience = %params.resilience,
            max_attempts,
            "Starting pipeline for topic of {} chars",
            topic.char_len()
        );

        let mut attempts = 0;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            if self.is_cancelled() {
                break;
            }
            attempts = attempt;

            match self.run_attempt(topic, progress).await {
                Ok(result) => {
                    info!(attempt, "Pipeline completed");
                    return Ok(PipelineOutput {
                        result,
                        source: ResultSource::Generated,
                        attempts,
                    });
                }
                Err(AttemptError::Cancelled) => {
                    info!(attempt, "Attempt cancelled");
                    break;
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts,
                        kind = e.kind().as_str(),
                        "Attempt failed: {}",
                        e
                    );
                    progress.on_attempt_failed(attempt, max_attempts, &e);
                    last_error = Some(e);

                    if attempt < max_attempts && !self.backoff().await {
                        break;
                    }
                }
            }
        }

        let failure = match last_error {
            Some(last) if !self.is_cancelled() => {
                if params.resilience.falls_back() {
                    RunPipelineError::ExhaustedRetries { attempts, last }
                } else {
                    RunPipelineError::AttemptFailed(last)
                }
            }
            _ => RunPipelineError::Cancelled,
        };

        if !params.resilience.falls_back() {
            return Err(failure);
        }

        warn!("Returning fallback result: {}", failure);
        progress.on_fallback(&failure);
        Ok(PipelineOutput {
            result: fallback_result(topic, &self.catalog),
            source: ResultSource::Fallback,
            attempts,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Sleep between attempts. Returns `false` if cancelled meanwhile.
    async fn backoff(&self) -> bool {
        let delay = self.config.params().backoff;
        if delay.is_zero() {
            return !self.is_cancelled();
        }
        debug!("Backing off for {:?}", delay);

        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => false,
                    _ = tokio::time::sleep(delay) => true,
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                true
            }
        }
    }

    /// One attempt, bounded by the attempt timeout and the cancellation
    /// token. Dropping the in-flight future aborts any fan-out tasks.
    async fn run_attempt(
        &self,
        topic: &Topic,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineResult, AttemptError> {
        let bounded = async {
            let attempt = self.generate(topic, progress);
            match self.config.params().attempt_timeout {
                Some(limit) => tokio::time::timeout(limit, attempt)
                    .await
                    .unwrap_or_else(|_| Err(AttemptError::AttemptTimeout(limit))),
                None => attempt.await,
            }
        };

        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(AttemptError::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }

    async fn generate(
        &self,
        topic: &Topic,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineResult, AttemptError> {
        let caller = BackendCaller::new(Arc::clone(&self.gateway), &self.config);
        let params = self.config.params();

        let (normalized, pair, mut opinions) = match params.strategy {
            GenerationStrategy::Combined => self.generate_combined(caller, topic, progress).await?,
            GenerationStrategy::Batched | GenerationStrategy::FanOut => {
                let normalized = NormalizeTopicUseCase::new(caller.clone())
                    .execute(topic, progress)
                    .await?;
                let pair = GenerateStancesUseCase::new(caller.clone())
                    .execute(&normalized.title, progress)
                    .await?;

                let mut assign = AssignOpinionsUseCase::new(caller, self.catalog);
                if params.strategy == GenerationStrategy::FanOut {
                    assign = assign.with_fan_out(params.max_concurrency);
                }
                let opinions = assign.execute(&normalized.title, &pair, progress).await?;

                (normalized, pair, opinions)
            }
        };

        if let Some(repair) = repair_sides(&mut opinions) {
            warn!(
                persona = repair.persona_id,
                forced = %repair.forced,
                "All personas chose the same side, repaired"
            );
        }

        Ok(PipelineResult::assemble(normalized, pair, &opinions))
    }

    async fn generate_combined(
        &self,
        caller: BackendCaller,
        topic: &Topic,
        progress: &dyn ProgressNotifier,
    ) -> Result<(NormalizedTopic, PositionPair, Vec<Opinion>), AttemptError> {
        info!("Stage: {}", Stage::Combined);
        progress.on_stage_start(&Stage::Combined, 1);

        let result = self.request_combined(&caller, topic).await;
        report_single(
            progress,
            &Stage::Combined,
            caller.model().as_str(),
            &result,
        );
        result
    }

    async fn request_combined(
        &self,
        caller: &BackendCaller,
        topic: &Topic,
    ) -> Result<(NormalizedTopic, PositionPair, Vec<Opinion>), AttemptError> {
        let malformed = |e| AttemptError::malformed(Stage::Combined, e);

        let payload: CombinedPayload = caller
            .request(
                Stage::Combined,
                None,
                PromptTemplate::combined(topic.content(), &self.catalog),
            )
            .await?;
        let (title, stances, opinions) = payload.split();

        // The backend title only matters when condensation is required
        let normalized = match NormalizedTopic::unchanged(topic) {
            Some(normalized) => normalized,
            None => NormalizedTopic::condensed(topic, title.into_title().map_err(malformed)?),
        };
        let pair = stances.into_pair().map_err(malformed)?;
        let opinions = opinions.into_opinions(&self.catalog).map_err(malformed)?;

        Ok((normalized, pair, opinions))
    }
}
