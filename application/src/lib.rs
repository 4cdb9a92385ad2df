//! Application layer for debate-arena
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{MAX_CONCURRENCY, PipelineConfig, PipelineParams};
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::assign_opinions::AssignOpinionsUseCase;
pub use use_cases::generate_stances::GenerateStancesUseCase;
pub use use_cases::normalize_topic::NormalizeTopicUseCase;
pub use use_cases::run_pipeline::{
    PipelineOutput, ResultSource, RunPipelineError, RunPipelineUseCase,
};
pub use use_cases::shared::{AttemptError, BackendCaller, FailureKind};
