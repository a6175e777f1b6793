//! Skill set configuration loading

use super::ConfigError;
use crate::types::SkillCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One configured skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDef {
    pub key: String,
    pub label: String,
    pub category: SkillCategory,
}

/// Container for skill configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SkillsConfig {
    skills: Vec<SkillDef>,
}

/// The enumerated skill set, in configuration order
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    skills: Vec<SkillDef>,
    index: HashMap<String, usize>,
}

impl SkillRegistry {
    /// Build a registry, rejecting empty or duplicate keys
    pub fn from_defs(skills: Vec<SkillDef>) -> Result<Self, ConfigError> {
        if skills.is_empty() {
            return Err(ConfigError::ValidationError(
                "skill set must not be empty".to_string(),
            ));
        }

        let mut index = HashMap::new();
        for (i, skill) in skills.iter().enumerate() {
            if skill.key.trim().is_empty() || skill.label.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "skill #{} has an empty key or label",
                    i
                )));
            }
            if index.insert(skill.key.clone(), i).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate skill key: {}",
                    skill.key
                )));
            }
        }

        Ok(SkillRegistry { skills, index })
    }

    pub fn get(&self, key: &str) -> Option<&SkillDef> {
        self.index.get(key).map(|&i| &self.skills[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.iter()
    }

    /// Skills of one category, in configuration order
    pub fn in_category(&self, category: SkillCategory) -> impl Iterator<Item = &SkillDef> {
        self.skills.iter().filter(move |s| s.category == category)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Load skill configurations from a TOML string
pub fn parse_skill_configs(content: &str) -> Result<SkillRegistry, ConfigError> {
    let config: SkillsConfig = super::parse_toml(content)?;
    SkillRegistry::from_defs(config.skills)
}
