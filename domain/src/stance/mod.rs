//! Stance subdomain.
//!
//! - [`value_objects`]: [`Side`], [`PositionPair`], [`Opinion`]
//! - [`validation`]: the both-sides constraint and its repair
//! - [`result`]: [`PipelineResult`], the uniform output shape
//! - [`fallback`]: deterministic backend-independent result

pub mod fallback;
pub mod result;
pub mod validation;
pub mod value_objects;

pub use fallback::fallback_result;
pub use result::{PhilosopherStance, PipelineResult};
pub use validation::{SideRepair, is_balanced, repair_sides};
pub use value_objects::{MAX_STANCE_CHARS, Opinion, PositionPair, Side};
