//! Humanity / Bestiality pair and corruption

use crate::config::SheetConstants;
use serde::{Deserialize, Serialize};

/// Per-character attributes. Humanity + Bestiality always sum to
/// `attribute_total` once the deriver has run.
///
/// `Default` is the unset pair (0 / 0). The total comes from config, so the
/// deriver replaces an unset pair with `balanced(attribute_total)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterAttributes {
    pub humanity: i32,
    pub bestiality: i32,
    /// Unbounded; only external game actions change it
    pub corruption: i32,
}

impl CharacterAttributes {
    /// Fresh attributes split evenly for the given total
    pub fn balanced(total: i32) -> Self {
        let bestiality = total / 2;
        CharacterAttributes {
            humanity: total - bestiality,
            bestiality,
            corruption: 0,
        }
    }

    /// Neither value set (missing from the stored record)
    pub fn is_unset(&self) -> bool {
        self.humanity == 0 && self.bestiality == 0
    }

    pub fn is_balanced(&self, constants: &SheetConstants) -> bool {
        self.humanity.checked_add(self.bestiality) == Some(constants.attribute_total)
            && (0..=constants.max_bestiality()).contains(&self.bestiality)
    }

    /// Restore the pair invariant, treating humanity as authoritative.
    /// An unset pair starts balanced. Returns true if anything changed.
    pub fn normalize(&mut self, constants: &SheetConstants) -> bool {
        if self.is_balanced(constants) {
            return false;
        }
        let before = *self;
        if self.is_unset() {
            let balanced = Self::balanced(constants.attribute_total);
            self.humanity = balanced.humanity;
            self.bestiality = balanced.bestiality;
        } else {
            self.humanity = self.humanity.clamp(1, constants.attribute_total);
            self.bestiality = constants.attribute_total - self.humanity;
        }
        before != *self
    }

    /// Umbral cost: one step from humanity towards bestiality
    pub fn shift_toward_beast(&mut self, constants: &SheetConstants) {
        self.normalize(constants);
        self.bestiality = (self.bestiality + 1).min(constants.max_bestiality());
        self.humanity = constants.attribute_total - self.bestiality;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(humanity: i32, bestiality: i32) -> CharacterAttributes {
        CharacterAttributes {
            humanity,
            bestiality,
            corruption: 0,
        }
    }

    #[test]
    fn test_balanced_pair_untouched() {
        let constants = SheetConstants::default();
        let mut a = attrs(8, 4);
        assert!(!a.normalize(&constants));
        assert_eq!(a, attrs(8, 4));
    }

    #[test]
    fn test_bestiality_recomputed_from_humanity() {
        let constants = SheetConstants::default();
        let mut a = attrs(9, 9);
        assert!(a.normalize(&constants));
        assert_eq!(a, attrs(9, 3));
    }

    #[test]
    fn test_out_of_range_humanity_clamped() {
        let constants = SheetConstants::default();

        let mut high = attrs(20, 0);
        high.normalize(&constants);
        assert_eq!(high, attrs(12, 0));

        let mut low = attrs(-3, 15);
        low.normalize(&constants);
        assert_eq!(low, attrs(1, 11));
    }

    #[test]
    fn test_shift_toward_beast_caps_at_eleven() {
        let constants = SheetConstants::default();
        let mut a = attrs(6, 6);
        a.shift_toward_beast(&constants);
        assert_eq!(a, attrs(5, 7));

        let mut edge = attrs(1, 11);
        edge.shift_toward_beast(&constants);
        assert_eq!(edge, attrs(1, 11));
    }

    #[test]
    fn test_missing_pair_starts_balanced_for_configured_total() {
        let constants = SheetConstants {
            attribute_total: 10,
            pool_bonus: 1,
        };
        let mut a: CharacterAttributes = serde_json::from_str(r#"{"corruption": 4}"#).unwrap();
        assert!(a.is_unset());
        assert!(a.normalize(&constants));
        assert_eq!(a.humanity, 5);
        assert_eq!(a.bestiality, 5);
        assert_eq!(a.corruption, 4);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let constants = SheetConstants::default();

        let mut a = attrs(i32::MAX, 1);
        assert!(!a.is_balanced(&constants));
        a.normalize(&constants);
        assert_eq!(a, attrs(12, 0));

        let mut b = attrs(i32::MIN, i32::MIN);
        b.normalize(&constants);
        assert_eq!(b, attrs(1, 11));

        let mut c = attrs(0, i32::MIN);
        c.shift_toward_beast(&constants);
        assert_eq!(c, attrs(1, 11));
    }

    #[test]
    fn test_balanced_odd_total() {
        let a = CharacterAttributes::balanced(7);
        assert_eq!((a.humanity, a.bestiality), (4, 3));
    }
}
