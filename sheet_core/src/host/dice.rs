//! Dice collaborators

use super::{DiceRoller, HostError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Uniform dice backed by any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        RngDice { rng }
    }
}

impl RngDice<StdRng> {
    /// Deterministic dice for replays and tests
    pub fn seeded(seed: u64) -> Self {
        RngDice::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngDice::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> DiceRoller for RngDice<R> {
    fn roll_die(&mut self, sides: u32) -> Result<u32, HostError> {
        if sides == 0 {
            return Err(HostError::InvalidDie(sides));
        }
        Ok(self.rng.gen_range(1..=sides))
    }
}

/// Pre-recorded results, consumed in order
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    results: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(results: impl IntoIterator<Item = u32>) -> Self {
        ScriptedDice {
            results: results.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> Result<u32, HostError> {
        let value = self
            .results
            .pop_front()
            .ok_or(HostError::Unavailable("scripted dice"))?;
        if value == 0 || value > sides {
            return Err(HostError::Failed(format!(
                "scripted value {} does not fit a d{}",
                value, sides
            )));
        }
        Ok(value)
    }
}
