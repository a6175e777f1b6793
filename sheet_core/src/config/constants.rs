//! Sheet constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable sheet constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConstants {
    /// Humanity + Bestiality always sum to this value
    #[serde(default = "default_attribute_total")]
    pub attribute_total: i32,
    /// Pool max = bestiality + pool_bonus
    #[serde(default = "default_pool_bonus")]
    pub pool_bonus: i32,
}

impl Default for SheetConstants {
    fn default() -> Self {
        SheetConstants {
            attribute_total: 12,
            pool_bonus: 1,
        }
    }
}

fn default_attribute_total() -> i32 {
    12
}
fn default_pool_bonus() -> i32 {
    1
}

impl SheetConstants {
    /// Highest bestiality allowed; humanity never drops below 1
    pub fn max_bestiality(&self) -> i32 {
        self.attribute_total - 1
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute_total < 2 {
            return Err(ConfigError::ValidationError(format!(
                "attribute_total must be at least 2, got {}",
                self.attribute_total
            )));
        }
        if self.pool_bonus < 0 {
            return Err(ConfigError::ValidationError(format!(
                "pool_bonus must not be negative, got {}",
                self.pool_bonus
            )));
        }
        Ok(())
    }
}
