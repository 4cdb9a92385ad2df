//! Stance value objects: sides, position pairs and persona opinions.

use crate::core::error::DomainError;
use crate::core::string::{clip_chars, strip_quotes};
use crate::persona::Persona;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum length of one position statement, in characters.
pub const MAX_STANCE_CHARS: usize = 12;

/// Which side of the debate an opinion supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Affirms the topic's claim
    Pro,
    /// Negates the topic's claim
    Con,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Pro => "pro",
            Side::Con => "con",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = DomainError;

    /// Accepts: "pro", "con" (any case), "正方", "反方"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pro" | "正方" => Ok(Side::Pro),
            "con" | "反方" => Ok(Side::Con),
            other => Err(DomainError::InvalidStance(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Two opposing short position statements (Value Object)
///
/// Invariant: both sides are non-empty, at most [`MAX_STANCE_CHARS`]
/// characters, and differ from each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPair {
    pro: String,
    con: String,
}

impl PositionPair {
    /// Build a pair from backend text, clipping each side to
    /// [`MAX_STANCE_CHARS`].
    pub fn new(pro: &str, con: &str) -> Result<Self, DomainError> {
        let pro = clip_chars(strip_quotes(pro), MAX_STANCE_CHARS).trim_end();
        let con = clip_chars(strip_quotes(con), MAX_STANCE_CHARS).trim_end();

        if pro.is_empty() || con.is_empty() {
            return Err(DomainError::InvalidStance(
                "position statements cannot be empty".to_string(),
            ));
        }
        if pro == con {
            return Err(DomainError::InvalidStance(format!(
                "pro and con are identical: {}",
                pro
            )));
        }

        Ok(Self {
            pro: pro.to_string(),
            con: con.to_string(),
        })
    }

    pub fn pro(&self) -> &str {
        &self.pro
    }

    pub fn con(&self) -> &str {
        &self.con
    }
}

/// One persona's side and justification for a given position pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opinion {
    pub persona: &'static Persona,
    pub side: Side,
    pub reason: String,
}

impl Opinion {
    /// Build an opinion from backend text.
    ///
    /// The reason is trimmed; an empty reason is rejected.
    pub fn new(
        persona: &'static Persona,
        side: Side,
        reason: &str,
    ) -> Result<Self, DomainError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidStance(format!(
                "empty reason for {}",
                persona.id
            )));
        }
        Ok(Self {
            persona,
            side,
            reason: reason.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::string::char_len;
    use crate::persona::PersonaCatalog;

    #[test]
    fn test_side_parse() {
        assert_eq!("pro".parse::<Side>().unwrap(), Side::Pro);
        assert_eq!(" CON ".parse::<Side>().unwrap(), Side::Con);
        assert_eq!("正方".parse::<Side>().unwrap(), Side::Pro);
        assert_eq!("反方".parse::<Side>().unwrap(), Side::Con);
        assert!("neutral".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_serde() {
        assert_eq!(serde_json::to_string(&Side::Pro).unwrap(), "\"pro\"");
        let side: Side = serde_json::from_str("\"Con\"").unwrap();
        assert_eq!(side, Side::Con);
        assert!(serde_json::from_str::<Side>("\"maybe\"").is_err());
    }

    #[test]
    fn test_pair_valid() {
        let pair = PositionPair::new("应限制AI发展", "不应限制AI发展").unwrap();
        assert_eq!(pair.pro(), "应限制AI发展");
        assert_eq!(pair.con(), "不应限制AI发展");
    }

    #[test]
    fn test_pair_clips_long_sides() {
        let pair = PositionPair::new(
            "人工智能的发展必须受到严格限制才行",
            "人工智能的发展应当完全放开",
        )
        .unwrap();
        assert_eq!(char_len(pair.pro()), MAX_STANCE_CHARS);
        assert_eq!(char_len(pair.con()), MAX_STANCE_CHARS);
    }

    #[test]
    fn test_pair_rejects_identical() {
        assert!(PositionPair::new("应该", "应该").is_err());
        // Identical only after clipping
        assert!(
            PositionPair::new("一二三四五六七八九十一二甲", "一二三四五六七八九十一二乙").is_err()
        );
    }

    #[test]
    fn test_pair_rejects_empty() {
        assert!(PositionPair::new("", "反对").is_err());
        assert!(PositionPair::new("支持", "  ").is_err());
    }

    #[test]
    fn test_opinion_requires_reason() {
        let persona = &PersonaCatalog::philosophers().as_slice()[0];
        assert!(Opinion::new(persona, Side::Pro, "  ").is_err());
        let opinion = Opinion::new(persona, Side::Pro, " 审视之后方可确信 ").unwrap();
        assert_eq!(opinion.reason, "审视之后方可确信");
    }
}
