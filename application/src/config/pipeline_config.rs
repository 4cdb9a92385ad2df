//! Pipeline configuration container.
//!
//! [`PipelineConfig`] groups everything a run needs besides the gateway:
//! which model to call, how to sample, and how to drive attempts.

use crate::config::PipelineParams;
use arena_domain::{GenerationParams, Model};

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    model: Model,
    generation: GenerationParams,
    params: PipelineParams,
}

impl PipelineConfig {
    pub fn new(model: Model, generation: GenerationParams, params: PipelineParams) -> Self {
        Self {
            model,
            generation,
            params,
        }
    }

    // ==================== Accessors ====================

    /// Backend model identifier.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Sampling parameters sent with every request.
    pub fn generation(&self) -> &GenerationParams {
        &self.generation
    }

    /// Attempt loop control.
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }
}
