//! Model value object representing a backend model identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Backend model used for generation (Value Object)
///
/// The backend speaks the OpenAI chat-completions dialect, so any identifier
/// the provider accepts can be used through [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    /// DeepSeek chat model (default)
    #[default]
    DeepSeekChat,
    /// DeepSeek V3.1 as exposed by OpenAI-compatible gateways
    DeepSeekV31,
    /// OpenAI GPT-4o mini
    Gpt4oMini,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepSeekChat => "deepseek-chat",
            Model::DeepSeekV31 => "DeepSeek-V3.1",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "deepseek-chat" => Model::DeepSeekChat,
            "DeepSeek-V3.1" => Model::DeepSeekV31,
            "gpt-4o-mini" => Model::Gpt4oMini,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
