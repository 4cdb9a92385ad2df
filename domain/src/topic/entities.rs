//! Topic and title value objects

use crate::core::error::DomainError;
use crate::core::string::{char_len, clip_chars, strip_quotes};
use serde::{Deserialize, Serialize};

/// Maximum length of a display title, in characters.
pub const MAX_TITLE_CHARS: usize = 15;

/// A raw debate topic as supplied by the caller (Value Object)
///
/// The text is kept verbatim: a short topic becomes its own title
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Create a new topic
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Topic cannot be empty");
        Self { content }
    }

    /// Try to create a new topic, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::InvalidTopic(
                "topic cannot be empty".to_string(),
            ))
        } else {
            Ok(Self { content })
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        char_len(&self.content)
    }

    /// Whether the topic must be condensed before it can serve as a title
    pub fn needs_condensing(&self) -> bool {
        self.char_len() > MAX_TITLE_CHARS
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Topic::new(s)
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Topic::new(s)
    }
}

/// Display form of a topic, at most [`MAX_TITLE_CHARS`] characters (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Build a title from backend text: unquote, trim and clip.
    ///
    /// Returns `None` when nothing is left.
    pub fn from_generated(text: &str) -> Option<Self> {
        let cleaned = clip_chars(strip_quotes(text), MAX_TITLE_CHARS).trim_end();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned.to_string()))
        }
    }

    /// Deterministic title: the first [`MAX_TITLE_CHARS`] characters of the topic.
    pub fn truncated(topic: &Topic) -> Self {
        Self(clip_chars(topic.content(), MAX_TITLE_CHARS).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of topic normalization.
///
/// `original` is set only when the title differs from the raw topic because
/// condensation actually happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTopic {
    pub title: Title,
    pub original: Option<String>,
}

impl NormalizedTopic {
    /// A topic short enough to be its own title.
    ///
    /// Returns `None` if the topic needs condensing.
    pub fn unchanged(topic: &Topic) -> Option<Self> {
        if topic.needs_condensing() {
            None
        } else {
            Some(Self {
                title: Title(topic.content().to_string()),
                original: None,
            })
        }
    }

    /// A condensed title for a long topic.
    pub fn condensed(topic: &Topic, title: Title) -> Self {
        Self {
            title,
            original: Some(topic.content().to_string()),
        }
    }

    /// Title by plain truncation, used when the backend is unavailable.
    pub fn truncated(topic: &Topic) -> Self {
        match Self::unchanged(topic) {
            Some(normalized) => normalized,
            None => Self::condensed(topic, Title::truncated(topic)),
        }
    }
}
