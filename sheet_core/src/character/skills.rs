//! SkillSet - per-character skill ratings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill key -> rating. Unlisted skills rate 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    ratings: BTreeMap<String, i32>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(&self, key: &str) -> i32 {
        self.ratings.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: impl Into<String>, rating: i32) {
        self.ratings.insert(key.into(), rating);
    }

    /// Builder form of `set`
    pub fn with(mut self, key: impl Into<String>, rating: i32) -> Self {
        self.set(key, rating);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.ratings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
