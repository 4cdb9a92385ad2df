//! Payload shapes the backend is asked to emit, and their conversion into
//! validated domain values.
//!
//! | Payload | Stage | JSON |
//! |---------|-------|------|
//! | [`TitlePayload`] | normalize | `{"refined_topic": "..."}` |
//! | [`StancePayload`] | stances | `{"pro_stance": "...", "con_stance": "..."}` |
//! | [`OpinionsPayload`] | opinions (batched) | `{"philosophers": [{"id", "stance", "reason"}]}` |
//! | [`OpinionPayload`] | opinions (one persona) | `{"stance": "pro", "reason": "..."}` |
//! | [`CombinedPayload`] | combined | all of the above in one object |
//!
//! Unknown fields are ignored.

use super::parsing::PayloadError;
use crate::core::error::DomainError;
use crate::persona::{Persona, PersonaCatalog};
use crate::stance::{Opinion, PositionPair, Side};
use crate::topic::Title;
use serde::Deserialize;

impl From<DomainError> for PayloadError {
    fn from(err: DomainError) -> Self {
        PayloadError::Invalid(err.to_string())
    }
}

/// Condensed title.
#[derive(Debug, Clone, Deserialize)]
pub struct TitlePayload {
    #[serde(alias = "refined_topic")]
    pub title: String,
}

impl TitlePayload {
    pub fn into_title(self) -> Result<Title, PayloadError> {
        Title::from_generated(&self.title)
            .ok_or_else(|| PayloadError::Invalid("empty title".to_string()))
    }
}

/// Opposing position statements.
#[derive(Debug, Clone, Deserialize)]
pub struct StancePayload {
    #[serde(alias = "pro")]
    pub pro_stance: String,
    #[serde(alias = "con")]
    pub con_stance: String,
}

impl StancePayload {
    pub fn into_pair(self) -> Result<PositionPair, PayloadError> {
        Ok(PositionPair::new(&self.pro_stance, &self.con_stance)?)
    }
}

/// A single persona's side and reason.
#[derive(Debug, Clone, Deserialize)]
pub struct OpinionPayload {
    #[serde(alias = "side")]
    pub stance: Side,
    pub reason: String,
}

impl OpinionPayload {
    pub fn into_opinion(self, persona: &'static Persona) -> Result<Opinion, PayloadError> {
        Ok(Opinion::new(persona, self.stance, &self.reason)?)
    }
}

/// One entry of a batched opinion list.
#[derive(Debug, Clone, Deserialize)]
pub struct OpinionEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "side")]
    pub stance: Side,
    pub reason: String,
}

/// Opinions for the whole catalog in one reply.
#[derive(Debug, Clone, Deserialize)]
pub struct OpinionsPayload {
    pub philosophers: Vec<OpinionEntry>,
}

/// Catalog index for a payload id. Accepts the id, the display name or the
/// Latin-script name.
fn resolve_persona(catalog: &PersonaCatalog, key: &str) -> Option<usize> {
    let key = key.trim();
    catalog.iter().position(|p| {
        p.id.eq_ignore_ascii_case(key) || p.name == key || p.name_en.eq_ignore_ascii_case(key)
    })
}

impl OpinionsPayload {
    /// Match entries to the catalog and return opinions in catalog order.
    ///
    /// Entries are matched by id. If no entry carries a usable id and there
    /// is exactly one entry per persona, they are matched by position.
    /// Extra or duplicate entries are ignored.
    pub fn into_opinions(self, catalog: &PersonaCatalog) -> Result<Vec<Opinion>, PayloadError> {
        let mut slots: Vec<Option<OpinionEntry>> = std::iter::repeat_with(|| None)
            .take(catalog.len())
            .collect();
        let mut unmatched = Vec::new();

        for entry in self.philosophers {
            match entry.id.as_deref().and_then(|id| resolve_persona(catalog, id)) {
                Some(idx) if slots[idx].is_none() => slots[idx] = Some(entry),
                _ => unmatched.push(entry),
            }
        }

        let none_matched = slots.iter().all(Option::is_none);
        if none_matched && unmatched.len() == catalog.len() {
            return catalog
                .iter()
                .zip(unmatched)
                .map(|(persona, entry)| Ok(Opinion::new(persona, entry.stance, &entry.reason)?))
                .collect();
        }

        catalog
            .iter()
            .zip(slots)
            .map(|(persona, slot)| match slot {
                Some(entry) => Ok(Opinion::new(persona, entry.stance, &entry.reason)?),
                None => Err(PayloadError::Invalid(format!(
                    "no opinion for {}",
                    persona.id
                ))),
            })
            .collect()
    }
}

/// Single-call payload carrying every piece of the result.
///
/// A backend-supplied `original_topic` is ignored; it is always derived
/// locally from the raw topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedPayload {
    #[serde(alias = "title")]
    pub refined_topic: String,
    #[serde(alias = "pro")]
    pub pro_stance: String,
    #[serde(alias = "con")]
    pub con_stance: String,
    pub philosophers: Vec<OpinionEntry>,
}

impl CombinedPayload {
    /// Split into the per-stage payloads.
    pub fn split(self) -> (TitlePayload, StancePayload, OpinionsPayload) {
        (
            TitlePayload {
                title: self.refined_topic,
            },
            StancePayload {
                pro_stance: self.pro_stance,
                con_stance: self.con_stance,
            },
            OpinionsPayload {
                philosophers: self.philosophers,
            },
        )
    }
}
