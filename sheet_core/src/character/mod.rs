//! CharacterRecord - the per-character document the host persists

mod attributes;
mod corruption;
mod pool;
mod skills;

pub use attributes::CharacterAttributes;
pub use corruption::{CorruptionState, MAX_PENALTY_TIER};
pub use pool::{PoolAdjustment, ResourcePool};
pub use skills::SkillSet;

use crate::config::SheetConfig;
use crate::history::HistoryLog;
use crate::types::HuntFrequency;
use serde::{Deserialize, Serialize};

/// Complete sheet state for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    // === Identity ===
    pub id: String,
    #[serde(default)]
    pub name: String,

    // === Inputs ===
    #[serde(default)]
    pub attributes: CharacterAttributes,
    #[serde(default)]
    pub skills: SkillSet,

    // === Resources ===
    #[serde(default)]
    pub pool: ResourcePool,

    // === Derived ===
    #[serde(default)]
    pub corruption_state: CorruptionState,

    // === Audit ===
    #[serde(default)]
    pub history: HistoryLog,
    /// Last hunt frequency announced by the deriver
    #[serde(default)]
    pub last_hunt_frequency: HuntFrequency,
}

impl CharacterRecord {
    /// Fresh character with balanced attributes and a full pool
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: &SheetConfig) -> Self {
        let attributes = CharacterAttributes::balanced(config.constants.attribute_total);
        let pool = ResourcePool::new(attributes.bestiality + config.constants.pool_bonus);
        CharacterRecord {
            id: id.into(),
            name: name.into(),
            attributes,
            skills: SkillSet::new(),
            pool,
            corruption_state: CorruptionState::default(),
            history: HistoryLog::new(),
            last_hunt_frequency: HuntFrequency::None,
        }
    }

    /// Builder: set skill ratings
    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = skills;
        self
    }

    /// Speaker name for chat reports
    pub fn speaker(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let config = SheetConfig::default();
        let record = CharacterRecord::new("pc-1", "Iara", &config);
        assert_eq!(record.attributes.humanity, 6);
        assert_eq!(record.attributes.bestiality, 6);
        assert_eq!(record.pool, ResourcePool::new(7));
        assert!(record.history.is_empty());
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let record: CharacterRecord = serde_json::from_str(r#"{"id": "pc-2"}"#).unwrap();
        assert_eq!(record.attributes, CharacterAttributes::default());
        assert_eq!(record.pool.current, None);
        assert_eq!(record.last_hunt_frequency, HuntFrequency::None);
        assert_eq!(record.speaker(), "pc-2");
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = SheetConfig::default();
        let record = CharacterRecord::new("pc-3", "Tomé", &config)
            .with_skills(SkillSet::new().with("stealth", 2));
        let json = serde_json::to_string(&record).unwrap();
        let back: CharacterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
