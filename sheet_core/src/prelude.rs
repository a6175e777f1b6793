//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Record
pub use crate::character::{CharacterAttributes, CharacterRecord, ResourcePool, SkillSet};
pub use crate::history::{HistoryEvent, HistoryLog};
pub use crate::types::{HuntFrequency, RollMode, SkillCategory};

// Config
pub use crate::config::{SheetConfig, SituationalModifier};

// Deriver and rolls
pub use crate::deriver::derive_attributes;
pub use crate::roll::{initiate_roll, resolve_roll, DialogSelection, PendingRoll, RollChoice, RollResult};

// Host
pub use crate::host::{ChatLog, Host, ReminderLog, RngDice, ScriptedDice, StringTable};

// Persistence
pub use crate::service::SheetService;
pub use crate::store::{CharacterStore, JsonFileStore, MemoryStore};
