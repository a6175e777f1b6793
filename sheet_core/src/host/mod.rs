//! Host collaborators - the services the virtual tabletop provides
//!
//! The sheet never rolls dice, talks to a calendar, or renders chat on its
//! own; it goes through these traits. In-memory implementations are provided
//! for tests and for the terminal front end.

mod calendar;
mod chat;
mod dice;
mod localize;

pub use calendar::{Reminder, ReminderLog};
pub use chat::{ChatLog, ChatMessage};
pub use dice::{RngDice, ScriptedDice};
pub use localize::StringTable;

use thiserror::Error;

/// Failure reported by a host collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    #[error("invalid die: d{0}")]
    InvalidDie(u32),
    #[error("{0}")]
    Failed(String),
}

/// Randomness: uniform draw in `[1, sides]`
pub trait DiceRoller: Send {
    fn roll_die(&mut self, sides: u32) -> Result<u32, HostError>;
}

/// Calendar integration for in-fiction reminders. Offset 0 means today.
pub trait Calendar: Send + Sync {
    fn schedule_reminder(
        &self,
        offset_days: u32,
        title: &str,
        description: &str,
    ) -> Result<(), HostError>;
}

/// Shared chat / report log
pub trait ChatSink: Send + Sync {
    fn publish(&self, speaker_id: &str, html: &str) -> Result<(), HostError>;
}

/// String-key -> display-string lookup
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Collaborators needed to resolve a roll, borrowed for one call
pub struct Host<'a> {
    pub dice: &'a mut dyn DiceRoller,
    pub chat: &'a dyn ChatSink,
    pub calendar: Option<&'a dyn Calendar>,
    pub localizer: &'a dyn Localizer,
}
