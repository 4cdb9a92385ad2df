//! Backend configuration from TOML (`[backend]` section)

use arena_domain::{ConfigIssue, ConfigIssueCode, GenerationParams, Model};
use serde::{Deserialize, Serialize};

/// Raw backend configuration from TOML
///
/// # Example
///
/// ```toml
/// [backend]
/// base_url = "https://api.deepseek.com/v1"
/// api_key_env = "DEEPSEEK_API_KEY"       # read the key from this variable
/// model = "deepseek-chat"
/// temperature = 0.7
/// max_tokens = 1000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        let generation = GenerationParams::default();
        Self {
            base_url: "https://api.deepseek.com/v1".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            api_key: None,
            model: Model::default().to_string(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
            top_p: generation.top_p,
            frequency_penalty: generation.frequency_penalty,
            presence_penalty: generation.presence_penalty,
        }
    }
}

impl FileBackendConfig {
    /// Parse the model identifier. Unknown names become [`Model::Custom`].
    pub fn parse_model(&self) -> Model {
        Model::from(self.model.trim())
    }

    /// Sampling parameters, with out-of-range values reset to defaults.
    pub fn parse_generation(&self) -> (GenerationParams, Vec<ConfigIssue>) {
        let defaults = GenerationParams::default();
        let mut params = GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        };
        let mut issues = Vec::new();

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(out_of_range(
                "backend.temperature",
                self.temperature,
                "must be within 0..=2",
                defaults.temperature,
            ));
            params.temperature = defaults.temperature;
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            issues.push(out_of_range(
                "backend.top_p",
                self.top_p,
                "must be within 0..=1",
                defaults.top_p,
            ));
            params.top_p = defaults.top_p;
        }
        if self.max_tokens == 0 {
            issues.push(out_of_range(
                "backend.max_tokens",
                self.max_tokens,
                "must be at least 1",
                defaults.max_tokens,
            ));
            params.max_tokens = defaults.max_tokens;
        }

        (params, issues)
    }

    /// Resolve the API key: the direct value wins over the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| lookup(&self.api_key_env))
            .filter(|k| !k.trim().is_empty())
    }

    pub(crate) fn check_api_key(&self, key: Option<&str>) -> Vec<ConfigIssue> {
        if key.is_some() {
            return vec![];
        }
        vec![ConfigIssue::warning(
            ConfigIssueCode::MissingApiKey {
                env: self.api_key_env.clone(),
            },
            format!(
                "backend: no API key found (set {} or backend.api_key); every run will use the fallback result",
                self.api_key_env
            ),
        )]
    }
}

fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    rule: &str,
    default: impl std::fmt::Display,
) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        },
        format!("{}: {} {}, falling back to {}", field, value, rule, default),
    )
}
