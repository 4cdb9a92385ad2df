//! Side-balance constraint and its local repair.
//!
//! A debate needs both camps. Among the opinions of one run at least one
//! persona must be `pro` and at least one `con`. When the backend puts
//! everyone on the same side the assignment is repaired in place without
//! re-querying:
//!
//! | Situation | Repair |
//! |-----------|--------|
//! | no `pro`  | first persona (catalog order) becomes `pro` |
//! | no `con`  | last persona (catalog order) becomes `con` |
//!
//! With two or more opinions at most one branch can apply.

use super::value_objects::{Opinion, Side};

/// A repair applied by [`repair_sides`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideRepair {
    /// Persona whose side was overridden
    pub persona_id: &'static str,
    /// Side it was forced to
    pub forced: Side,
}

/// Count opinions on `side`.
pub fn count_side(opinions: &[Opinion], side: Side) -> usize {
    opinions.iter().filter(|o| o.side == side).count()
}

/// Whether both sides are represented.
pub fn is_balanced(opinions: &[Opinion]) -> bool {
    count_side(opinions, Side::Pro) >= 1 && count_side(opinions, Side::Con) >= 1
}

/// Enforce that both sides are represented, mutating at most one opinion.
///
/// `opinions` must be in catalog order. Returns the repair that was
/// applied, or `None` if the assignment was already balanced (or empty).
pub fn repair_sides(opinions: &mut [Opinion]) -> Option<SideRepair> {
    if opinions.is_empty() {
        return None;
    }

    let (target, forced) = if count_side(opinions, Side::Pro) == 0 {
        (0, Side::Pro)
    } else if count_side(opinions, Side::Con) == 0 {
        (opinions.len() - 1, Side::Con)
    } else {
        return None;
    };

    let opinion = &mut opinions[target];
    opinion.side = forced;
    Some(SideRepair {
        persona_id: opinion.persona.id,
        forced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaCatalog;

    fn opinions(sides: &[Side]) -> Vec<Opinion> {
        PersonaCatalog::philosophers()
            .iter()
            .zip(sides)
            .map(|(persona, side)| Opinion::new(persona, *side, "理由").unwrap())
            .collect()
    }

    fn sides(opinions: &[Opinion]) -> Vec<Side> {
        opinions.iter().map(|o| o.side).collect()
    }

    #[test]
    fn test_balanced_untouched() {
        let mut ops = opinions(&[Side::Pro, Side::Con, Side::Con, Side::Pro, Side::Con]);
        let before = sides(&ops);
        assert_eq!(repair_sides(&mut ops), None);
        assert_eq!(sides(&ops), before);
    }

    #[test]
    fn test_all_pro_flips_last_to_con() {
        let mut ops = opinions(&[Side::Pro; 5]);
        let repair = repair_sides(&mut ops).unwrap();
        assert_eq!(repair.persona_id, "freud");
        assert_eq!(repair.forced, Side::Con);
        assert_eq!(
            sides(&ops),
            vec![Side::Pro, Side::Pro, Side::Pro, Side::Pro, Side::Con]
        );
    }

    #[test]
    fn test_all_con_flips_first_to_pro() {
        let mut ops = opinions(&[Side::Con; 5]);
        let repair = repair_sides(&mut ops).unwrap();
        assert_eq!(repair.persona_id, "socrates");
        assert_eq!(repair.forced, Side::Pro);
        assert_eq!(
            sides(&ops),
            vec![Side::Pro, Side::Con, Side::Con, Side::Con, Side::Con]
        );
    }

    #[test]
    fn test_repair_is_idempotent() {
        let mut ops = opinions(&[Side::Con; 5]);
        repair_sides(&mut ops);
        assert!(is_balanced(&ops));
        assert_eq!(repair_sides(&mut ops), None);
    }

    #[test]
    fn test_repair_keeps_reasons() {
        let mut ops = opinions(&[Side::Pro; 5]);
        repair_sides(&mut ops);
        assert!(ops.iter().all(|o| o.reason == "理由"));
    }

    #[test]
    fn test_empty_is_noop() {
        let mut ops: Vec<Opinion> = Vec::new();
        assert_eq!(repair_sides(&mut ops), None);
    }
}
