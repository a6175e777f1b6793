//! Core enumerations shared by the deriver and the roll resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping used to lay out skills on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Physical,
    Mental,
    Social,
    Combat,
}

impl SkillCategory {
    /// Get all categories in sheet order
    pub fn all() -> &'static [SkillCategory] {
        &[
            SkillCategory::Physical,
            SkillCategory::Mental,
            SkillCategory::Social,
            SkillCategory::Combat,
        ]
    }

    /// String-table key for the category heading
    pub fn label_key(&self) -> &'static str {
        match self {
            SkillCategory::Physical => "sheet.category.physical",
            SkillCategory::Mental => "sheet.category.mental",
            SkillCategory::Social => "sheet.category.social",
            SkillCategory::Combat => "sheet.category.combat",
        }
    }
}

/// How often the character must hunt, derived from corruption
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HuntFrequency {
    #[default]
    None,
    Weekly,
    TwiceWeekly,
    Daily,
    Constant,
}

impl HuntFrequency {
    /// Days until the next hunt is due, `None` when no hunt is required
    pub fn interval_days(&self) -> Option<u32> {
        match self {
            HuntFrequency::None => None,
            HuntFrequency::Weekly => Some(7),
            HuntFrequency::TwiceWeekly => Some(3),
            HuntFrequency::Daily => Some(1),
            HuntFrequency::Constant => Some(0),
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            HuntFrequency::None => "sheet.hunt.none",
            HuntFrequency::Weekly => "sheet.hunt.weekly",
            HuntFrequency::TwiceWeekly => "sheet.hunt.twice_weekly",
            HuntFrequency::Daily => "sheet.hunt.daily",
            HuntFrequency::Constant => "sheet.hunt.constant",
        }
    }
}

impl fmt::Display for HuntFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HuntFrequency::None => "none",
            HuntFrequency::Weekly => "weekly",
            HuntFrequency::TwiceWeekly => "twice-weekly",
            HuntFrequency::Daily => "daily",
            HuntFrequency::Constant => "constant",
        };
        f.write_str(s)
    }
}

/// Way a resource-pool point is spent during a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// Halved die, no side effect
    Sacred,
    /// Full die, costs one point of humanity
    Umbral,
}

impl RollMode {
    pub fn all() -> &'static [RollMode] {
        &[RollMode::Sacred, RollMode::Umbral]
    }

    /// Contribution of the spent d6 to the total
    pub fn spent_die_contribution(&self, d6: u32) -> i32 {
        match self {
            RollMode::Sacred => d6.div_ceil(2) as i32,
            RollMode::Umbral => d6 as i32,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            RollMode::Sacred => "sheet.roll.mode.sacred",
            RollMode::Umbral => "sheet.roll.mode.umbral",
        }
    }

    /// The other mode, used by dialog toggles
    pub fn toggled(&self) -> RollMode {
        match self {
            RollMode::Sacred => RollMode::Umbral,
            RollMode::Umbral => RollMode::Sacred,
        }
    }
}
