//! CorruptionState - penalty tier and hunt cadence derived from corruption

use crate::types::HuntFrequency;
use serde::{Deserialize, Serialize};

/// Highest penalty tier
pub const MAX_PENALTY_TIER: u8 = 4;

/// Derived from corruption by a step function; stored on the record for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorruptionState {
    pub penalty_tier: u8,
    pub hunt_frequency: HuntFrequency,
}

impl CorruptionState {
    /// Tiers change every 3 points: 0-2, 3-5, 6-8, 9-11, 12+
    pub fn from_corruption(corruption: i32) -> Self {
        let tier = (corruption.max(0) / 3).min(MAX_PENALTY_TIER as i32) as u8;
        let hunt_frequency = match tier {
            0 => HuntFrequency::None,
            1 => HuntFrequency::Weekly,
            2 => HuntFrequency::TwiceWeekly,
            3 => HuntFrequency::Daily,
            _ => HuntFrequency::Constant,
        };
        CorruptionState {
            penalty_tier: tier,
            hunt_frequency,
        }
    }
}
