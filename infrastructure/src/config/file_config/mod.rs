//! Raw configuration as read from TOML files and the environment.
//!
//! Every section uses `#[serde(default)]`, so a partial file only overrides
//! the keys it names. String-typed enums are parsed afterwards so that a bad
//! value produces a [`ConfigIssue`] instead of a load failure.

mod backend;
mod output;
mod pipeline;

pub use backend::FileBackendConfig;
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;

use arena_application::PipelineConfig;
use arena_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend endpoint, credentials and sampling
    pub backend: FileBackendConfig,
    /// Strategy, retries, timeouts
    pub pipeline: FilePipelineConfig,
    /// Output format and color
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration and return all detected issues.
    ///
    /// Invalid values never abort a run; they are reported here and
    /// replaced by defaults in [`to_pipeline_config`](Self::to_pipeline_config).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with_key(self.backend.resolve_api_key().as_deref())
    }

    pub(crate) fn validate_with_key(&self, api_key: Option<&str>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.backend.parse_generation().1);
        issues.extend(self.pipeline.parse_params().1);
        issues.extend(self.backend.check_api_key(api_key));
        issues
    }

    /// Build the application-level pipeline configuration.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(
            self.backend.parse_model(),
            self.backend.parse_generation().0,
            self.pipeline.parse_params().0,
        )
    }
}
