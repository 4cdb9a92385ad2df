//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PipelineParams`]: attempt loop control (strategy, retries, timeouts, concurrency)
//! - [`PipelineConfig`]: model, sampling and pipeline parameters for one run

pub mod pipeline_config;
pub mod pipeline_params;

pub use pipeline_config::PipelineConfig;
pub use pipeline_params::{MAX_CONCURRENCY, PipelineParams};
