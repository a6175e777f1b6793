//! sheet_core - Character sheet logic for a tabletop RPG hosted in a virtual tabletop
//!
//! This library provides:
//! - CharacterRecord: attributes, resource pool, skills and history for one character
//! - derive_attributes: invariant-restoring recomputation after every update
//! - Roll resolution: two-phase skill rolls spending the resource pool
//! - Host collaborators: dice, calendar, chat and localization traits
//! - SheetService: store-backed operations serialized per character

pub mod character;
pub mod config;
pub mod deriver;
pub mod history;
pub mod host;
pub mod prelude;
pub mod roll;
pub mod service;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use character::{CharacterAttributes, CharacterRecord, CorruptionState, ResourcePool, SkillSet};
pub use config::{ConfigError, SheetConfig, SituationalModifier, SkillDef};
pub use deriver::{derive_attributes, DeriveReport};
pub use history::{HistoryEntry, HistoryEvent, HistoryLog};
pub use host::{Calendar, ChatSink, DiceRoller, Host, HostError, Localizer};
pub use roll::{initiate_roll, resolve_roll, PendingRoll, RollChoice, RollError, RollResult};
pub use service::{ServiceError, SheetService};
pub use types::{HuntFrequency, RollMode, SkillCategory};
