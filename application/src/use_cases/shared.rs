//! Shared utilities for use cases.
//!
//! Contains the per-attempt error type and the backend call helper used by
//! every stage (NormalizeTopic, GenerateStances, AssignOpinions, RunPipeline).

use crate::config::PipelineConfig;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use arena_domain::{
    CompletionRequest, GenerationParams, Model, PayloadError, PromptTemplate, Stage,
    parse_payload,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Coarse classification of an attempt failure.
///
/// Used for diagnostics only; the retry loop treats every kind except
/// `Cancelled` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, HTTP, timeout or task failure
    Transient,
    /// The backend replied but the payload was unusable
    Malformed,
    /// The caller cancelled the run
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transient => "transient",
            FailureKind::Malformed => "malformed",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

/// Why one pipeline attempt failed.
#[derive(Error, Debug, Clone)]
pub enum AttemptError {
    #[error("{stage} backend error: {source}")]
    Backend { stage: Stage, source: GatewayError },

    #[error("{stage} call timed out after {after:?}")]
    CallTimeout { stage: Stage, after: Duration },

    #[error("{stage} returned a malformed payload: {source}")]
    MalformedPayload { stage: Stage, source: PayloadError },

    #[error("Attempt timed out after {0:?}")]
    AttemptTimeout(Duration),

    #[error("Task failed: {0}")]
    TaskFailed(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl AttemptError {
    pub(crate) fn malformed(stage: Stage, source: PayloadError) -> Self {
        AttemptError::MalformedPayload { stage, source }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AttemptError::MalformedPayload { .. } => FailureKind::Malformed,
            AttemptError::Cancelled => FailureKind::Cancelled,
            AttemptError::Backend { .. }
            | AttemptError::CallTimeout { .. }
            | AttemptError::AttemptTimeout(_)
            | AttemptError::TaskFailed(_) => FailureKind::Transient,
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AttemptError::Cancelled)
    }
}

/// Issues one backend call and decodes its payload.
///
/// Cheap to clone; fan-out tasks each own a copy.
#[derive(Clone)]
pub struct BackendCaller {
    gateway: Arc<dyn LlmGateway>,
    model: Model,
    generation: GenerationParams,
    call_timeout: Duration,
}

impl BackendCaller {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: &PipelineConfig) -> Self {
        Self {
            gateway,
            model: config.model().clone(),
            generation: *config.generation(),
            call_timeout: config.params().call_timeout,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Send `prompt` for `stage` and parse the reply as `T`.
    ///
    /// The call is bounded by the configured call timeout regardless of
    /// whether the gateway honours `CompletionRequest::timeout`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        stage: Stage,
        persona_id: Option<&'static str>,
        prompt: String,
    ) -> Result<T, AttemptError> {
        let mut request = CompletionRequest::new(
            stage,
            self.model.clone(),
            PromptTemplate::system(),
            prompt,
            self.generation,
            self.call_timeout,
        );
        if let Some(id) = persona_id {
            request = request.for_persona(id);
        }

        debug!(
            stage = stage.as_str(),
            persona = persona_id.unwrap_or("-"),
            model = %self.model,
            prompt_chars = request.prompt().chars().count(),
            "Sending backend request"
        );

        let reply = tokio::time::timeout(self.call_timeout, self.gateway.complete(&request))
            .await
            .map_err(|_| AttemptError::CallTimeout {
                stage,
                after: self.call_timeout,
            })?
            .map_err(|source| AttemptError::Backend { stage, source })?;

        debug!(
            stage = stage.as_str(),
            reply_chars = reply.chars().count(),
            "Backend replied"
        );

        parse_payload(&reply).map_err(|source| AttemptError::malformed(stage, source))
    }
}

/// Report a single-task stage around `result`.
pub(crate) fn report_single<T>(
    progress: &dyn ProgressNotifier,
    stage: &Stage,
    label: &str,
    result: &Result<T, AttemptError>,
) {
    progress.on_task_complete(stage, label, result.is_ok());
    progress.on_stage_complete(stage);
}
