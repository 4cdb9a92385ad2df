//! Backend payload parsing.

pub mod parsing;
pub mod schema;

pub use parsing::{PayloadError, parse_payload, strip_code_fence};
pub use schema::{
    CombinedPayload, OpinionEntry, OpinionPayload, OpinionsPayload, StancePayload, TitlePayload,
};
