//! The fixed persona catalog.
//!
//! Five philosophers, in a fixed order that every pipeline result preserves
//! so consumers can index personas positionally.

use crate::core::error::DomainError;
use serde::Serialize;

/// A fixed debating persona (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    /// Stable identifier used in payloads
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Latin-script name
    pub name_en: &'static str,
    /// Short philosophical descriptor fed to the backend
    pub philosophy: &'static str,
}

static PHILOSOPHERS: [Persona; 5] = [
    Persona {
        id: "socrates",
        name: "苏格拉底",
        name_en: "Socrates",
        philosophy: "认识你自己，未经审视的生活不值得过",
    },
    Persona {
        id: "nietzsche",
        name: "尼采",
        name_en: "Nietzsche",
        philosophy: "上帝已死，超人哲学，权力意志",
    },
    Persona {
        id: "wittgenstein",
        name: "维特根斯坦",
        name_en: "Wittgenstein",
        philosophy: "语言的界限就是世界的界限，语言游戏",
    },
    Persona {
        id: "kant",
        name: "康德",
        name_en: "Kant",
        philosophy: "绝对命令，人是目的而非工具，理性批判",
    },
    Persona {
        id: "freud",
        name: "弗洛伊德",
        name_en: "Freud",
        philosophy: "本我、自我、超我，无意识，精神分析",
    },
];

/// Ordered, immutable set of personas.
///
/// Cheap to copy; all copies share the same static data.
#[derive(Debug, Clone, Copy)]
pub struct PersonaCatalog {
    personas: &'static [Persona],
}

impl PersonaCatalog {
    /// The standard five-philosopher catalog
    pub fn philosophers() -> Self {
        Self {
            personas: &PHILOSOPHERS,
        }
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> std::slice::Iter<'static, Persona> {
        self.personas.iter()
    }

    pub fn as_slice(&self) -> &'static [Persona] {
        self.personas
    }

    pub fn get(&self, id: &str) -> Result<&'static Persona, DomainError> {
        self.personas
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::UnknownPersona(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.personas.iter().position(|p| p.id == id)
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::philosophers()
    }
}
