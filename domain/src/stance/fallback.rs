//! Deterministic offline result.
//!
//! Used when every backend attempt has failed. Depends on the topic text
//! only, so the same topic always yields the same payload.

use super::result::PipelineResult;
use super::value_objects::{Opinion, PositionPair, Side};
use crate::core::string::clip_chars;
use crate::persona::PersonaCatalog;
use crate::topic::{NormalizedTopic, Topic};

const PRO_PREFIX: &str = "支持：";
const CON_PREFIX: &str = "反对：";
/// Title characters kept after the three-character prefix.
const TEMPLATE_TITLE_CHARS: usize = 9;

/// Fixed assignment for the standard catalog, in catalog order.
const ASSIGNMENTS: &[(&str, Side, &str)] = &[
    ("socrates", Side::Pro, "审视之后，方知其善"),
    ("nietzsche", Side::Con, "重估一切价值，拒绝盲从"),
    ("wittgenstein", Side::Con, "此问或源于语言的误用"),
    ("kant", Side::Pro, "理性可为此立普遍法则"),
    ("freud", Side::Con, "主张之下藏着无意识动机"),
];

/// Reason used for personas outside the fixed table.
const DEFAULT_REASON: &str = "基于其哲学思想倾向";

/// Position pair templated over a title.
pub fn fallback_pair(title: &str) -> PositionPair {
    let core = clip_chars(title, TEMPLATE_TITLE_CHARS);
    let pro = format!("{}{}", PRO_PREFIX, core);
    let con = format!("{}{}", CON_PREFIX, core);
    match PositionPair::new(&pro, &con) {
        Ok(pair) => pair,
        // The prefixes differ, so the sides can only collide if the title
        // itself is blank after clipping.
        Err(_) => fallback_pair("此题"),
    }
}

/// Fixed persona assignments. Both sides are always represented.
pub fn fallback_opinions(catalog: &PersonaCatalog) -> Vec<Opinion> {
    catalog
        .iter()
        .enumerate()
        .map(|(index, persona)| {
            let (side, reason) = ASSIGNMENTS
                .iter()
                .find(|(id, _, _)| *id == persona.id)
                .map(|(_, side, reason)| (*side, *reason))
                .unwrap_or_else(|| {
                    let side = if index % 2 == 0 { Side::Pro } else { Side::Con };
                    (side, DEFAULT_REASON)
                });
            Opinion {
                persona,
                side,
                reason: reason.to_string(),
            }
        })
        .collect()
}

/// The full fallback result for `topic`.
pub fn fallback_result(topic: &Topic, catalog: &PersonaCatalog) -> PipelineResult {
    let normalized = NormalizedTopic::truncated(topic);
    let pair = fallback_pair(normalized.title.as_str());
    let mut opinions = fallback_opinions(catalog);
    super::validation::repair_sides(&mut opinions);
    PipelineResult::assemble(normalized, pair, &opinions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::string::char_len;
    use crate::stance::value_objects::MAX_STANCE_CHARS;
    use crate::topic::MAX_TITLE_CHARS;

    const LONG_TOPIC: &str = "我们应该限制人工智能的发展吗";

    #[test]
    fn test_fallback_is_deterministic() {
        let catalog = PersonaCatalog::philosophers();
        let a = fallback_result(&Topic::new(LONG_TOPIC), &catalog);
        let b = fallback_result(&Topic::new(LONG_TOPIC), &catalog);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_short_topic() {
        let result = fallback_result(&Topic::new("真爱存在吗?"), &PersonaCatalog::philosophers());
        assert_eq!(result.topic(), "真爱存在吗?");
        assert!(result.original_topic().is_none());
        assert_eq!(result.pro_stance(), "支持：真爱存在吗?");
        assert_eq!(result.con_stance(), "反对：真爱存在吗?");
    }

    #[test]
    fn test_fallback_long_topic() {
        let topic = "为了人类的长远未来，我们是否应该立即限制通用人工智能的研究与发展";
        let result = fallback_result(&Topic::new(topic), &PersonaCatalog::philosophers());
        assert_eq!(char_len(result.topic()), MAX_TITLE_CHARS);
        assert_eq!(result.original_topic(), Some(topic));
        assert!(char_len(result.pro_stance()) <= MAX_STANCE_CHARS);
        assert!(char_len(result.con_stance()) <= MAX_STANCE_CHARS);
        assert_ne!(result.pro_stance(), result.con_stance());
    }

    #[test]
    fn test_fallback_assignment() {
        let result = fallback_result(&Topic::new(LONG_TOPIC), &PersonaCatalog::philosophers());
        let sides: Vec<_> = result.philosophers().iter().map(|p| p.stance).collect();
        assert_eq!(
            sides,
            vec![Side::Pro, Side::Con, Side::Con, Side::Pro, Side::Con]
        );
        assert!(result.philosophers().iter().all(|p| !p.reason.is_empty()));
    }

    #[test]
    fn test_fallback_default_catalog_has_both_sides() {
        let result = fallback_result(&Topic::new("话题"), &PersonaCatalog::default());
        assert_eq!(result.philosophers().len(), 5);
        assert!(result.count(Side::Pro) >= 1);
        assert!(result.count(Side::Con) >= 1);
    }
}
