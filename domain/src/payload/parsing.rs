//! Structured payload extraction from backend replies.
//!
//! Backends are asked for a bare JSON object but frequently wrap it in a
//! markdown fence or add a sentence around it. Extraction tolerates both:
//!
//! 1. Strip a leading ` ```json ` / ` ``` ` fence and a trailing ` ``` `
//! 2. Parse the remainder as JSON
//! 3. Failing that, parse the span from the first `{` to the last `}`
//!
//! Everything else is a [`PayloadError`], which the pipeline treats as a
//! failed attempt.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a backend reply could not be turned into a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("empty reply")]
    Empty,

    #[error("reply is not JSON: {0}")]
    Unparsable(String),

    #[error("reply does not match the expected shape: {0}")]
    Schema(String),

    #[error("reply violates a constraint: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => PayloadError::Schema(err.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                PayloadError::Unparsable(err.to_string())
            }
        }
    }
}

/// Remove a surrounding markdown code fence, if any, and trim.
///
/// Only the fence markers are removed; text between them is untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        // Drop the info string ("json", "JSON", ...) up to the first newline
        body = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// The span from the first `{` to the last `}`, inclusive.
fn outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a backend reply into `T`.
///
/// # Examples
///
/// ```
/// use arena_domain::payload::{TitlePayload, parse_payload};
///
/// let reply = "```json\n{\"refined_topic\": \"AI应否受限\"}\n```";
/// let payload: TitlePayload = parse_payload(reply).unwrap();
/// assert_eq!(payload.title, "AI应否受限");
/// ```
pub fn parse_payload<T: DeserializeOwned>(reply: &str) -> Result<T, PayloadError> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Err(PayloadError::Empty);
    }

    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(err) if err.is_data() => Err(err.into()),
        Err(err) => match outer_object(body) {
            // Prose around the object; retry on the object alone
            Some(object) if object.len() < body.len() => {
                serde_json::from_str::<T>(object).map_err(PayloadError::from)
            }
            _ => Err(err.into()),
        },
    }
}
