//! Roll resolution - spend, roll, report, record

use super::{RollError, RollResult};
use crate::character::CharacterRecord;
use crate::config::{SheetConfig, SituationalModifier};
use crate::deriver::derive_attributes;
use crate::history::{HistoryEntry, HistoryEvent};
use crate::host::Host;
use crate::types::RollMode;

/// Die spent from the resource pool
pub const SPENT_DIE_SIDES: u32 = 6;
/// Die rolled for the skill itself
pub const SKILL_DIE_SIDES: u32 = 12;

/// Confirmed dialog choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollChoice {
    pub mode: RollMode,
    pub modifier: Option<SituationalModifier>,
}

impl RollChoice {
    pub fn new(mode: RollMode) -> Self {
        RollChoice {
            mode,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: SituationalModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn modifier_value(&self) -> i32 {
        self.modifier.as_ref().map_or(0, |m| m.value)
    }
}

/// Resolve a skill roll against the record.
///
/// 1. Spend one pool point (floored at 0)
/// 2. Roll the spent d6; sacred halves it rounding up, umbral keeps it raw
///    and moves one point from humanity to bestiality, then re-derives
/// 3. Roll the d12
/// 4. Total = d12 + rating + spent die + modifier
/// 5. Publish the report, append a roll entry to the history
///
/// The pool point is not refunded if a collaborator fails after step 1.
pub fn resolve_roll(
    record: &mut CharacterRecord,
    config: &SheetConfig,
    skill_key: &str,
    choice: &RollChoice,
    host: &mut Host<'_>,
) -> Result<RollResult, RollError> {
    let skill = config
        .skills
        .get(skill_key)
        .ok_or_else(|| RollError::UnknownSkill(skill_key.to_string()))?;

    let pool_remaining = record.pool.spend();

    let d6 = host
        .dice
        .roll_die(SPENT_DIE_SIDES)
        .map_err(RollError::Dice)?;
    let spent_die = choice.mode.spent_die_contribution(d6);

    if choice.mode == RollMode::Umbral {
        record.attributes.shift_toward_beast(&config.constants);
        derive_attributes(record, config, host.calendar, host.localizer);
    }

    let d12 = host
        .dice
        .roll_die(SKILL_DIE_SIDES)
        .map_err(RollError::Dice)?;

    let rating = record.skills.rating(skill_key);
    let modifier = choice.modifier_value();
    let total = (d12 as i32)
        .saturating_add(rating)
        .saturating_add(spent_die)
        .saturating_add(modifier);

    let result = RollResult {
        character_id: record.id.clone(),
        skill_key: skill.key.clone(),
        skill_label: skill.label.clone(),
        mode: choice.mode,
        d6,
        spent_die,
        d12,
        rating,
        modifier,
        modifier_label: choice.modifier.as_ref().map(|m| m.label.clone()),
        total,
        pool_remaining,
        attributes_after: record.attributes,
    };

    host.chat
        .publish(&record.id, &result.report_html(host.localizer))
        .map_err(RollError::Chat)?;

    record.history.append(HistoryEntry::now(HistoryEvent::Roll {
        skill: skill.key.clone(),
        total,
        humanity: record.attributes.humanity,
        bestiality: record.attributes.bestiality,
        corruption: record.attributes.corruption,
        mode: choice.mode,
        d6,
        d12,
        modifier,
    }));

    tracing::info!("{}: {}", record.id, result.summary());
    Ok(result)
}
