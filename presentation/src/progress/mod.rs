//! Progress reporters for the CLI

pub mod reporter;
