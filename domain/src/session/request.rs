//! A single backend completion request.

use super::entities::Message;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline stage a backend call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Condense a long topic into a title
    Normalize,
    /// Generate the pro/con position pair
    Stances,
    /// Assign a side and reason to each persona
    Opinions,
    /// Everything in one call
    Combined,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Normalize => "normalize",
            Stage::Stances => "stances",
            Stage::Opinions => "opinions",
            Stage::Combined => "combined",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Normalize => "Topic Normalization",
            Stage::Stances => "Position Generation",
            Stage::Opinions => "Persona Assignment",
            Stage::Combined => "Combined Generation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 0.9,
            frequency_penalty: 0.7,
            presence_penalty: 0.4,
        }
    }
}

/// One request to a text-generation backend.
///
/// `stage` and `persona_id` are routing metadata: adapters ignore them,
/// test doubles use them to pick a scripted reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub stage: Stage,
    pub persona_id: Option<&'static str>,
    pub model: Model,
    pub messages: Vec<Message>,
    pub params: GenerationParams,
    /// Wall-clock limit for this call
    pub timeout: Duration,
}

impl CompletionRequest {
    /// A system + user request for `stage`.
    pub fn new(
        stage: Stage,
        model: Model,
        system: &str,
        prompt: impl Into<String>,
        params: GenerationParams,
        timeout: Duration,
    ) -> Self {
        Self {
            stage,
            persona_id: None,
            model,
            messages: vec![Message::system(system), Message::user(prompt)],
            params,
            timeout,
        }
    }

    pub fn for_persona(mut self, persona_id: &'static str) -> Self {
        self.persona_id = Some(persona_id);
        self
    }

    /// Content of the last user message.
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == super::entities::Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}
