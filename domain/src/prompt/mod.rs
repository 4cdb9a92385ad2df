//! Prompt domain
//!
//! Templates for each backend stage of the stance pipeline.

mod template;

pub use template::PromptTemplate;
