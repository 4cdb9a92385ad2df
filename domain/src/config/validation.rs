//! Structured configuration issues.
//!
//! Invalid settings do not abort loading: each one is reported as a
//! [`ConfigIssue`] and the affected value falls back to its default.
//!
//! # Examples
//!
//! ```
//! use arena_domain::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::warning(
//!     ConfigIssueCode::OutOfRange {
//!         field: "pipeline.max_attempts".to_string(),
//!         value: "0".to_string(),
//!     },
//!     "pipeline.max_attempts: must be at least 1",
//! );
//! assert_eq!(issue.severity, Severity::Warning);
//! assert_eq!(issue.code.field(), Some("pipeline.max_attempts"));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string setting names an unknown variant.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric setting is outside its accepted range.
    OutOfRange { field: String, value: String },
    /// No API key is configured; every backend call will fail.
    MissingApiKey { env: String },
}

impl ConfigIssueCode {
    /// Dotted config key the issue refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigIssueCode::InvalidEnumValue { field, .. }
            | ConfigIssueCode::OutOfRange { field, .. } => Some(field),
            ConfigIssueCode::MissingApiKey { .. } => None,
        }
    }
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_has_no_field() {
        let code = ConfigIssueCode::MissingApiKey {
            env: "DEEPSEEK_API_KEY".to_string(),
        };
        assert_eq!(code.field(), None);
    }

    #[test]
    fn test_constructors_set_severity() {
        let code = ConfigIssueCode::InvalidEnumValue {
            field: "pipeline.strategy".to_string(),
            value: "bogus".to_string(),
            valid_values: vec!["batched".to_string()],
        };
        assert!(!ConfigIssue::warning(code.clone(), "w").is_error());
        assert!(ConfigIssue::error(code, "e").is_error());
    }
}
