//! Pipeline result - the single output shape of every execution path.

use super::validation::count_side;
use super::value_objects::{Opinion, PositionPair, Side};
use crate::topic::NormalizedTopic;
use serde::Serialize;

/// One persona entry of a [`PipelineResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhilosopherStance {
    pub id: String,
    pub name: String,
    pub stance: Side,
    pub reason: String,
}

impl From<&Opinion> for PhilosopherStance {
    fn from(opinion: &Opinion) -> Self {
        Self {
            id: opinion.persona.id.to_string(),
            name: opinion.persona.name.to_string(),
            stance: opinion.side,
            reason: opinion.reason.clone(),
        }
    }
}

/// Structured stance set for one topic.
///
/// Serializes to:
///
/// ```json
/// {
///   "topic": "...",
///   "original_topic": "..." | null,
///   "pro_stance": "...",
///   "con_stance": "...",
///   "philosophers": [{ "id": "...", "name": "...", "stance": "pro", "reason": "..." }]
/// }
/// ```
///
/// Constructed once per invocation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    topic: String,
    original_topic: Option<String>,
    pro_stance: String,
    con_stance: String,
    philosophers: Vec<PhilosopherStance>,
}

impl PipelineResult {
    /// Assemble the uniform result from the pieces produced by any path.
    ///
    /// `opinions` must already be in catalog order and side-balanced
    /// (see [`repair_sides`](super::validation::repair_sides)).
    pub fn assemble(normalized: NormalizedTopic, pair: PositionPair, opinions: &[Opinion]) -> Self {
        debug_assert!(!opinions.is_empty(), "a result needs at least one opinion");
        debug_assert!(
            count_side(opinions, Side::Pro) >= 1 && count_side(opinions, Side::Con) >= 1,
            "opinions must be repaired before assembly"
        );

        Self {
            topic: normalized.title.into_string(),
            original_topic: normalized.original,
            pro_stance: pair.pro().to_string(),
            con_stance: pair.con().to_string(),
            philosophers: opinions.iter().map(PhilosopherStance::from).collect(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn original_topic(&self) -> Option<&str> {
        self.original_topic.as_deref()
    }

    pub fn pro_stance(&self) -> &str {
        &self.pro_stance
    }

    pub fn con_stance(&self) -> &str {
        &self.con_stance
    }

    pub fn philosophers(&self) -> &[PhilosopherStance] {
        &self.philosophers
    }

    /// Number of personas on `side`
    pub fn count(&self, side: Side) -> usize {
        self.philosophers
            .iter()
            .filter(|p| p.stance == side)
            .count()
    }
}
