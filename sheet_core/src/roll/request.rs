//! Roll request - the first phase of the roll dialog

use super::resolution::{resolve_roll, RollChoice};
use super::{RollError, RollResult};
use crate::character::CharacterRecord;
use crate::config::{SheetConfig, SituationalModifier, SkillDef};
use crate::host::Host;
use crate::types::RollMode;

/// A validated roll waiting for the player's choice of mode and modifier.
/// Dropping it (or calling `cancel`) abandons the roll with no state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRoll {
    pub character_id: String,
    pub skill: SkillDef,
    pub rating: i32,
    pub pool_available: i32,
    /// Dialog options in display order, duplicates kept
    pub modifiers: Vec<SituationalModifier>,
}

/// What the player picked in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogSelection {
    pub mode: RollMode,
    pub modifier_index: Option<usize>,
}

/// Host-side dialog. Returns `None` when the player dismisses it.
pub trait RollPrompt {
    fn choose(&mut self, pending: &PendingRoll) -> Option<DialogSelection>;
}

/// Check preconditions and build the dialog request. Never mutates.
pub fn initiate_roll(
    record: &CharacterRecord,
    config: &SheetConfig,
    skill_key: &str,
) -> Result<PendingRoll, RollError> {
    let skill = config
        .skills
        .get(skill_key)
        .ok_or_else(|| RollError::UnknownSkill(skill_key.to_string()))?;

    let pool_available = record.pool.available();
    if pool_available <= 0 {
        return Err(RollError::NoResourceAvailable {
            character: record.id.clone(),
        });
    }

    Ok(PendingRoll {
        character_id: record.id.clone(),
        skill: skill.clone(),
        rating: record.skills.rating(skill_key),
        pool_available,
        modifiers: config.modifiers.clone(),
    })
}

impl PendingRoll {
    pub fn modes(&self) -> &'static [RollMode] {
        RollMode::all()
    }

    /// Turn a dialog selection into a choice, validating the modifier index
    pub fn confirm(
        &self,
        mode: RollMode,
        modifier_index: Option<usize>,
    ) -> Result<RollChoice, RollError> {
        let modifier = match modifier_index {
            Some(i) => Some(
                self.modifiers
                    .get(i)
                    .cloned()
                    .ok_or(RollError::UnknownModifier(i))?,
            ),
            None => None,
        };
        Ok(RollChoice { mode, modifier })
    }

    /// Second phase: resolve against the re-read record. The pool is checked
    /// again since it may have been spent while the dialog was open.
    pub fn resolve(
        self,
        record: &mut CharacterRecord,
        config: &SheetConfig,
        selection: DialogSelection,
        host: &mut Host<'_>,
    ) -> Result<RollResult, RollError> {
        if record.id != self.character_id {
            return Err(RollError::CharacterMismatch {
                expected: self.character_id,
                actual: record.id.clone(),
            });
        }
        if record.pool.available() <= 0 {
            return Err(RollError::NoResourceAvailable {
                character: record.id.clone(),
            });
        }
        let choice = self.confirm(selection.mode, selection.modifier_index)?;
        resolve_roll(record, config, &self.skill.key, &choice, host)
    }

    pub fn cancel(self) {
        tracing::debug!(
            "{}: roll for {} dismissed",
            self.character_id,
            self.skill.key
        );
    }
}

/// Run the full dialog flow. `Ok(None)` means the player dismissed the dialog.
pub fn roll_with_prompt(
    record: &mut CharacterRecord,
    config: &SheetConfig,
    skill_key: &str,
    prompt: &mut dyn RollPrompt,
    host: &mut Host<'_>,
) -> Result<Option<RollResult>, RollError> {
    let pending = initiate_roll(record, config, skill_key)?;
    match prompt.choose(&pending) {
        Some(selection) => pending.resolve(record, config, selection, host).map(Some),
        None => {
            pending.cancel();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{ResourcePool, SkillSet};
    use crate::host::{ChatLog, ScriptedDice, StringTable};

    struct FixedPrompt(Option<DialogSelection>);

    impl RollPrompt for FixedPrompt {
        fn choose(&mut self, pending: &PendingRoll) -> Option<DialogSelection> {
            assert!(pending.pool_available > 0);
            self.0
        }
    }

    fn record() -> CharacterRecord {
        CharacterRecord::new("pc", "Iara", &SheetConfig::default())
            .with_skills(SkillSet::new().with("occultism", 3))
    }

    #[test]
    fn test_initiate_builds_request() {
        let config = SheetConfig::default();
        let pending = initiate_roll(&record(), &config, "occultism").unwrap();
        assert_eq!(pending.skill.label, "Occultism");
        assert_eq!(pending.rating, 3);
        assert_eq!(pending.pool_available, 7);
        assert_eq!(pending.modifiers, config.modifiers);
        assert_eq!(pending.modes(), &[RollMode::Sacred, RollMode::Umbral]);
    }

    #[test]
    fn test_unknown_skill_rejected_without_change() {
        let config = SheetConfig::default();
        let r = record();
        let before = r.clone();
        let err = initiate_roll(&r, &config, "necromancy").unwrap_err();
        assert_eq!(err, RollError::UnknownSkill("necromancy".to_string()));
        assert!(err.is_rejection());
        assert_eq!(r, before);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let config = SheetConfig::default();
        let mut r = record();
        r.pool = ResourcePool { max: 7, current: Some(0) };
        let err = initiate_roll(&r, &config, "occultism").unwrap_err();
        assert!(matches!(err, RollError::NoResourceAvailable { .. }));
    }

    #[test]
    fn test_duplicate_modifiers_selectable_by_position() {
        let config = SheetConfig::default();
        let pending = initiate_roll(&record(), &config, "occultism").unwrap();

        let hindered = pending.confirm(RollMode::Sacred, Some(2)).unwrap();
        let distracted = pending.confirm(RollMode::Sacred, Some(3)).unwrap();
        assert_eq!(hindered.modifier_value(), -1);
        assert_eq!(distracted.modifier_value(), -1);
        assert_ne!(hindered.modifier, distracted.modifier);

        assert_eq!(
            pending.confirm(RollMode::Sacred, Some(99)),
            Err(RollError::UnknownModifier(99))
        );
    }

    #[test]
    fn test_dismissed_prompt_leaves_record_untouched() {
        let config = SheetConfig::default();
        let strings = StringTable::bundled();
        let chat = ChatLog::new();
        let mut dice = ScriptedDice::new([]);
        let mut host = Host {
            dice: &mut dice,
            chat: &chat,
            calendar: None,
            localizer: &strings,
        };

        let mut r = record();
        let before = r.clone();
        let outcome =
            roll_with_prompt(&mut r, &config, "occultism", &mut FixedPrompt(None), &mut host)
                .unwrap();
        assert!(outcome.is_none());
        assert_eq!(r, before);
        assert!(chat.is_empty());
    }

    #[test]
    fn test_prompt_flow_resolves() {
        let config = SheetConfig::default();
        let strings = StringTable::bundled();
        let chat = ChatLog::new();
        let mut dice = ScriptedDice::new([5, 7]);
        let mut host = Host {
            dice: &mut dice,
            chat: &chat,
            calendar: None,
            localizer: &strings,
        };

        let mut r = record();
        let selection = DialogSelection {
            mode: RollMode::Sacred,
            modifier_index: None,
        };
        let result = roll_with_prompt(
            &mut r,
            &config,
            "occultism",
            &mut FixedPrompt(Some(selection)),
            &mut host,
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.total, 13);
        assert_eq!(r.pool.available(), 6);
    }

    #[test]
    fn test_pool_spent_while_dialog_open() {
        let config = SheetConfig::default();
        let strings = StringTable::bundled();
        let chat = ChatLog::new();
        let mut dice = ScriptedDice::new([1, 1]);
        let mut host = Host {
            dice: &mut dice,
            chat: &chat,
            calendar: None,
            localizer: &strings,
        };

        let mut r = record();
        let pending = initiate_roll(&r, &config, "occultism").unwrap();
        r.pool.current = Some(0);
        let err = pending
            .resolve(
                &mut r,
                &config,
                DialogSelection {
                    mode: RollMode::Sacred,
                    modifier_index: None,
                },
                &mut host,
            )
            .unwrap_err();
        assert!(matches!(err, RollError::NoResourceAvailable { .. }));
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn test_resolve_against_other_character_rejected() {
        let config = SheetConfig::default();
        let strings = StringTable::bundled();
        let chat = ChatLog::new();
        let mut dice = ScriptedDice::new([1, 1]);
        let mut host = Host {
            dice: &mut dice,
            chat: &chat,
            calendar: None,
            localizer: &strings,
        };

        let pending = initiate_roll(&record(), &config, "occultism").unwrap();
        let mut other = CharacterRecord::new("npc", "Someone", &config);
        let err = pending
            .resolve(
                &mut other,
                &config,
                DialogSelection {
                    mode: RollMode::Umbral,
                    modifier_index: None,
                },
                &mut host,
            )
            .unwrap_err();
        assert!(matches!(err, RollError::CharacterMismatch { .. }));
        assert_eq!(other.pool.available(), 7);
    }
}
