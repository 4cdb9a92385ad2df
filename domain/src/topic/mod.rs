//! Topic subdomain: raw debate topics and their bounded display titles.

pub mod entities;

pub use entities::{MAX_TITLE_CHARS, NormalizedTopic, Title, Topic};
