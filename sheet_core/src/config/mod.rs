//! Configuration loading from TOML files

mod constants;
mod modifiers;
mod skills;

pub use constants::SheetConstants;
pub use modifiers::{parse_modifier_configs, SituationalModifier};
pub use skills::{parse_skill_configs, SkillDef, SkillRegistry};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

const DEFAULT_CONSTANTS: &str = include_str!("../../config/constants.toml");
const DEFAULT_SKILLS: &str = include_str!("../../config/skills.toml");
const DEFAULT_MODIFIERS: &str = include_str!("../../config/modifiers.toml");

/// Static sheet configuration, built once at startup and passed by reference
/// to the deriver, the roll resolver and the service.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub constants: SheetConstants,
    pub skills: SkillRegistry,
    /// Roll dialog options; order is display order, duplicates allowed
    pub modifiers: Vec<SituationalModifier>,
}

impl SheetConfig {
    /// Assemble a config from already parsed parts, validating them together
    pub fn new(
        constants: SheetConstants,
        skills: SkillRegistry,
        modifiers: Vec<SituationalModifier>,
    ) -> Result<Self, ConfigError> {
        constants.validate()?;
        if let Some(m) = modifiers.iter().find(|m| m.label.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "situational modifier with value {} has an empty label",
                m.value
            )));
        }
        Ok(SheetConfig {
            constants,
            skills,
            modifiers,
        })
    }

    /// Load `constants.toml`, `skills.toml` and `modifiers.toml` from a directory.
    /// A missing `constants.toml` falls back to the defaults.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let constants_path = dir.join("constants.toml");
        let constants = if constants_path.exists() {
            load_toml(&constants_path)?
        } else {
            SheetConstants::default()
        };
        let skills = parse_skill_configs(&fs::read_to_string(dir.join("skills.toml"))?)?;
        let modifiers = parse_modifier_configs(&fs::read_to_string(dir.join("modifiers.toml"))?)?;
        Self::new(constants, skills, modifiers)
    }

    /// Parse a config from TOML strings
    pub fn parse(constants: &str, skills: &str, modifiers: &str) -> Result<Self, ConfigError> {
        Self::new(
            parse_toml(constants)?,
            parse_skill_configs(skills)?,
            parse_modifier_configs(modifiers)?,
        )
    }
}

impl Default for SheetConfig {
    /// Bundled configuration. Falls back to an empty skill set if the
    /// bundled files ever fail to parse.
    fn default() -> Self {
        Self::parse(DEFAULT_CONSTANTS, DEFAULT_SKILLS, DEFAULT_MODIFIERS).unwrap_or_else(|e| {
            tracing::warn!("bundled sheet config failed to load: {}", e);
            SheetConfig {
                constants: SheetConstants::default(),
                skills: SkillRegistry::default(),
                modifiers: Vec::new(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads_bundled_files() {
        let config = SheetConfig::default();
        assert_eq!(config.constants.attribute_total, 12);
        assert_eq!(config.skills.len(), 12);
        assert_eq!(config.modifiers.len(), 7);
    }

    #[test]
    fn test_bundled_modifiers_keep_duplicates_in_order() {
        let config = SheetConfig::default();
        let minus_one: Vec<&str> = config
            .modifiers
            .iter()
            .filter(|m| m.value == -1)
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(minus_one, ["Hindered", "Distracted"]);
        assert_eq!(config.modifiers[0].value, 2);
    }

    #[test]
    fn test_load_dir_without_constants() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("skills.toml"),
            "[[skills]]\nkey = \"brawl\"\nlabel = \"Brawl\"\ncategory = \"combat\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("modifiers.toml"),
            "[[modifiers]]\nvalue = -2\nlabel = \"Dark\"\n",
        )
        .unwrap();

        let config = SheetConfig::load_dir(dir.path()).unwrap();
        assert_eq!(config.constants.attribute_total, 12);
        assert!(config.skills.contains("brawl"));
        assert_eq!(config.modifiers[0].label, "Dark");
    }

    #[test]
    fn test_missing_skills_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SheetConfig::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_empty_modifier_label_rejected() {
        let err = SheetConfig::parse(
            "",
            "[[skills]]\nkey = \"a\"\nlabel = \"A\"\ncategory = \"mental\"\n",
            "[[modifiers]]\nvalue = 1\nlabel = \"  \"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
