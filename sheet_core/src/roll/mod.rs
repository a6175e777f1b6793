//! Skill roll resolution
//!
//! Two phases: `initiate_roll` validates and returns a `PendingRoll` for the
//! host to present; `PendingRoll::resolve` (or `resolve_roll` directly)
//! spends the pool point, rolls, reports and records the result.

mod request;
mod resolution;
mod result;

pub use request::{initiate_roll, roll_with_prompt, DialogSelection, PendingRoll, RollPrompt};
pub use resolution::{resolve_roll, RollChoice, SPENT_DIE_SIDES, SKILL_DIE_SIDES};
pub use result::RollResult;

use crate::host::HostError;
use thiserror::Error;

/// Roll failure. Rejections leave the record untouched; collaborator
/// failures happen after the pool point is already spent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollError {
    #[error("unknown skill: {0}")]
    UnknownSkill(String),
    #[error("{character} has no dice left in the pool")]
    NoResourceAvailable { character: String },
    #[error("no situational modifier at position {0}")]
    UnknownModifier(usize),
    #[error("roll was prepared for {expected}, not {actual}")]
    CharacterMismatch { expected: String, actual: String },
    #[error("dice roll failed: {0}")]
    Dice(HostError),
    #[error("failed to publish roll report: {0}")]
    Chat(HostError),
}

impl RollError {
    /// User-facing rejection raised before any state change
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RollError::Dice(_) | RollError::Chat(_))
    }
}
