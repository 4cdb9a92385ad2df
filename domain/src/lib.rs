//! Domain layer for debate-arena
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Topic → Title
//!
//! A free-text [`Topic`] is reduced to a display [`Title`] of at most 15
//! characters. Short topics are their own title; long ones are condensed
//! and the raw text is kept as `original_topic`.
//!
//! ## Position pair and opinions
//!
//! A [`PositionPair`] holds two antagonistic statements. Each [`Persona`]
//! of the fixed [`PersonaCatalog`] takes a [`Side`] with a short reason
//! ([`Opinion`]). Both sides must always be represented
//! ([`repair_sides`]).
//!
//! ## Result
//!
//! Every execution path (generated or fallback) ends in the same
//! [`PipelineResult`] shape.

pub mod config;
pub mod core;
pub mod payload;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod stance;
pub mod topic;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, GenerationStrategy, OutputFormat, ResilienceStrategy, Severity,
};
pub use core::{error::DomainError, model::Model};
pub use payload::{
    CombinedPayload, OpinionPayload, OpinionsPayload, PayloadError, StancePayload, TitlePayload,
    parse_payload,
};
pub use persona::{Persona, PersonaCatalog};
pub use prompt::PromptTemplate;
pub use session::{CompletionRequest, GenerationParams, Message, Role, Stage};
pub use stance::{
    MAX_STANCE_CHARS, Opinion, PhilosopherStance, PipelineResult, PositionPair, Side, SideRepair,
    fallback_result, is_balanced, repair_sides,
};
pub use topic::{MAX_TITLE_CHARS, NormalizedTopic, Title, Topic};
