//! String table localizer

use super::Localizer;
use crate::config::{load_toml, parse_toml, ConfigError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_STRINGS: &str = include_str!("../../config/strings.toml");

#[derive(Debug, Deserialize)]
struct StringsFile {
    #[serde(default)]
    strings: HashMap<String, String>,
}

/// Key -> display string, falling back to the key itself
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: StringsFile = load_toml(path)?;
        Ok(StringTable {
            strings: file.strings,
        })
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: StringsFile = parse_toml(content)?;
        Ok(StringTable {
            strings: file.strings,
        })
    }

    /// Bundled English strings
    pub fn bundled() -> Self {
        Self::parse(DEFAULT_STRINGS).unwrap_or_else(|e| {
            tracing::warn!("bundled string table failed to load: {}", e);
            StringTable::default()
        })
    }

    /// Overlay another table on top of this one
    pub fn merge(&mut self, other: StringTable) {
        self.strings.extend(other.strings);
    }
}

impl Localizer for StringTable {
    fn localize(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
