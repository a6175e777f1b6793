//! Situational modifier configuration loading

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// A selectable bonus or penalty for the roll dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationalModifier {
    pub value: i32,
    pub label: String,
}

impl SituationalModifier {
    pub fn new(value: i32, label: impl Into<String>) -> Self {
        SituationalModifier {
            value,
            label: label.into(),
        }
    }

    /// Dialog text, e.g. "-2 Wounded"
    pub fn display(&self) -> String {
        format!("{:+} {}", self.value, self.label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModifiersConfig {
    #[serde(default)]
    modifiers: Vec<SituationalModifier>,
}

/// Load the modifier list from a TOML string, preserving order and duplicates
pub fn parse_modifier_configs(content: &str) -> Result<Vec<SituationalModifier>, ConfigError> {
    let config: ModifiersConfig = super::parse_toml(content)?;
    Ok(config.modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_not_merged() {
        let toml = r#"
[[modifiers]]
value = -2
label = "Darkness"

[[modifiers]]
value = -2
label = "Rain"
"#;

        let modifiers = parse_modifier_configs(toml).unwrap();
        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[0], SituationalModifier::new(-2, "Darkness"));
        assert_eq!(modifiers[1], SituationalModifier::new(-2, "Rain"));
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_modifier_configs("").unwrap().is_empty());
    }

    #[test]
    fn test_display_has_explicit_sign() {
        assert_eq!(SituationalModifier::new(2, "Ideal").display(), "+2 Ideal");
        assert_eq!(SituationalModifier::new(-1, "Hindered").display(), "-1 Hindered");
    }
}
