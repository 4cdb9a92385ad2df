//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: backend model identifiers
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-counted string helpers

pub mod error;
pub mod model;
pub mod string;
