//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assign_opinions;
pub mod generate_stances;
pub mod normalize_topic;
pub mod run_pipeline;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;
