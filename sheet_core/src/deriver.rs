//! Attribute deriver - recompute dependent fields after any record update
//!
//! Order matters, each step reads values normalized by the previous one:
//! 1. Repair the humanity / bestiality pair
//! 2. Recompute the pool max and clamp current
//! 3. Recompute penalty tier and hunt frequency from corruption
//! 4. Announce a hunt-frequency change exactly once (marker, reminder, history)
//!
//! Never fails. The only collaborator failure possible here (the calendar)
//! is logged and ignored so the record always stays usable.

use crate::character::{CharacterRecord, CorruptionState, PoolAdjustment};
use crate::config::SheetConfig;
use crate::history::{HistoryEntry, HistoryEvent};
use crate::host::{Calendar, Localizer};
use crate::types::HuntFrequency;

/// What a derive pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeriveReport {
    pub attributes_repaired: bool,
    pub pool_adjustment: PoolAdjustment,
    /// New hunt frequency, if it differs from the last one announced
    pub threshold_crossed: Option<HuntFrequency>,
    pub reminder_scheduled: bool,
}

impl DeriveReport {
    /// True if the pass modified anything beyond the derived corruption state
    pub fn changed(&self) -> bool {
        self.attributes_repaired
            || self.pool_adjustment != PoolAdjustment::Unchanged
            || self.threshold_crossed.is_some()
    }
}

/// Normalize a record in place. Idempotent: a second call with no external
/// change in between modifies nothing and appends no history.
pub fn derive_attributes(
    record: &mut CharacterRecord,
    config: &SheetConfig,
    calendar: Option<&dyn Calendar>,
    localizer: &dyn Localizer,
) -> DeriveReport {
    let constants = &config.constants;

    let attributes_repaired = record.attributes.normalize(constants);
    if attributes_repaired {
        tracing::debug!(
            "{}: attribute pair repaired to humanity={} bestiality={}",
            record.id,
            record.attributes.humanity,
            record.attributes.bestiality
        );
    }

    let max = record.attributes.bestiality.saturating_add(constants.pool_bonus);
    let pool_adjustment = record.pool.normalize(max);
    if pool_adjustment != PoolAdjustment::Unchanged {
        tracing::debug!(
            "{}: pool {:?}, now {}/{}",
            record.id,
            pool_adjustment,
            record.pool.available(),
            record.pool.max
        );
    }

    record.corruption_state = CorruptionState::from_corruption(record.attributes.corruption);

    let frequency = record.corruption_state.hunt_frequency;
    let mut threshold_crossed = None;
    let mut reminder_scheduled = false;
    if frequency != record.last_hunt_frequency {
        tracing::info!(
            "{}: hunt frequency {} -> {} (corruption {})",
            record.id,
            record.last_hunt_frequency,
            frequency,
            record.attributes.corruption
        );
        record.last_hunt_frequency = frequency;
        threshold_crossed = Some(frequency);

        if frequency != HuntFrequency::None {
            reminder_scheduled = schedule_hunt_reminder(record, calendar, localizer);
        }

        record.history.append(HistoryEntry::now(
            HistoryEvent::CorruptionThresholdCrossed {
                hunt_frequency: frequency,
                corruption: record.attributes.corruption,
            },
        ));
    }

    DeriveReport {
        attributes_repaired,
        pool_adjustment,
        threshold_crossed,
        reminder_scheduled,
    }
}

fn schedule_hunt_reminder(
    record: &CharacterRecord,
    calendar: Option<&dyn Calendar>,
    localizer: &dyn Localizer,
) -> bool {
    let frequency = record.corruption_state.hunt_frequency;
    let Some(offset) = frequency.interval_days() else {
        return false;
    };
    let Some(calendar) = calendar else {
        tracing::debug!("{}: no calendar, hunt reminder skipped", record.id);
        return false;
    };

    let title = format!(
        "{}: {}",
        localizer.localize("sheet.reminder.title"),
        localizer.localize(frequency.label_key())
    );
    let description = format!(
        "{} ({} {}, {})",
        localizer.localize("sheet.reminder.description"),
        localizer.localize("sheet.reminder.corruption"),
        record.attributes.corruption,
        record.speaker()
    );

    match calendar.schedule_reminder(offset, &title, &description) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("{}: failed to schedule hunt reminder: {}", record.id, e);
            false
        }
    }
}
