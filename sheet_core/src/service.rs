//! SheetService - store-backed operations serialized per character
//!
//! Every operation that reads or writes a record holds that character's lock
//! for its whole load -> mutate -> derive -> save cycle, so two rolls can
//! never spend the same pool point and a derive never interleaves with a
//! roll's attribute shift. Different characters proceed independently.
//! Lock table entries live only while some operation holds them.

use crate::character::CharacterRecord;
use crate::config::SheetConfig;
use crate::deriver::{derive_attributes, DeriveReport};
use crate::host::{Calendar, ChatSink, DiceRoller, Host, Localizer, StringTable};
use crate::roll::{initiate_roll, DialogSelection, PendingRoll, RollError, RollResult};
use crate::store::{CharacterStore, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Roll(#[from] RollError),
    #[error("record id changed from {expected} to {actual}")]
    IdChanged { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, ServiceError>;

pub struct SheetService<S> {
    config: SheetConfig,
    store: S,
    dice: Mutex<Box<dyn DiceRoller>>,
    chat: Arc<dyn ChatSink>,
    calendar: Option<Arc<dyn Calendar>>,
    localizer: Arc<dyn Localizer>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: CharacterStore> SheetService<S> {
    pub fn new(
        config: SheetConfig,
        store: S,
        dice: impl DiceRoller + 'static,
        chat: Arc<dyn ChatSink>,
    ) -> Self {
        SheetService {
            config,
            store,
            dice: Mutex::new(Box::new(dice)),
            chat,
            calendar: None,
            localizer: Arc::new(StringTable::bundled()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn character_lock(&self, id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(id.to_string()).or_default().clone()
    }

    /// Drop the table entry once no other caller holds a handle to it.
    /// Handles are only cloned under the table lock, so a count of two
    /// (table + `lock`) means nobody can be waiting on it.
    fn release_lock(&self, id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = locks
            .get(id)
            .is_some_and(|entry| Arc::ptr_eq(entry, &lock) && Arc::strong_count(&lock) == 2);
        if idle {
            locks.remove(id);
        }
    }

    /// Run `op` while holding the character's lock
    fn with_lock<T>(&self, id: &str, op: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock = self.character_lock(id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            op()
        };
        self.release_lock(id, lock);
        result
    }

    fn derive(&self, record: &mut CharacterRecord) -> DeriveReport {
        derive_attributes(
            record,
            &self.config,
            self.calendar.as_deref(),
            self.localizer.as_ref(),
        )
    }

    /// Load and derive; persists the normalized record if deriving changed it
    fn load_settled(&self, id: &str) -> Result<CharacterRecord> {
        let mut record = self.store.load(id)?;
        if self.derive(&mut record).changed() {
            self.store.save(&record)?;
        }
        Ok(record)
    }

    /// Store a new (or replacement) record after deriving it
    pub fn create(&self, mut record: CharacterRecord) -> Result<DeriveReport> {
        let id = record.id.clone();
        self.with_lock(&id, || {
            let report = self.derive(&mut record);
            self.store.save(&record)?;
            Ok(report)
        })
    }

    /// Current settled state of a character
    pub fn get(&self, id: &str) -> Result<CharacterRecord> {
        self.with_lock(id, || self.load_settled(id))
    }

    /// Apply an external edit, then derive and save. The edit may not
    /// change the record id.
    pub fn update(
        &self,
        id: &str,
        edit: impl FnOnce(&mut CharacterRecord),
    ) -> Result<(CharacterRecord, DeriveReport)> {
        self.with_lock(id, || {
            let mut record = self.store.load(id)?;
            edit(&mut record);
            if record.id != id {
                tracing::warn!("{}: edit tried to rename record to {}", id, record.id);
                return Err(ServiceError::IdChanged {
                    expected: id.to_string(),
                    actual: record.id,
                });
            }
            let report = self.derive(&mut record);
            self.store.save(&record)?;
            Ok((record, report))
        })
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.with_lock(id, || Ok(self.store.delete(id)?))
    }

    /// First phase of a roll: validate against the settled record
    pub fn initiate_roll(&self, id: &str, skill_key: &str) -> Result<PendingRoll> {
        self.with_lock(id, || {
            let record = self.load_settled(id)?;
            initiate_roll(&record, &self.config, skill_key).map_err(|e| {
                tracing::info!("{}: roll rejected: {}", id, e);
                e.into()
            })
        })
    }

    /// Second phase: resolve and persist. A failure after the pool point was
    /// spent still saves the record; the point is not refunded.
    pub fn resolve_roll(
        &self,
        pending: PendingRoll,
        selection: DialogSelection,
    ) -> Result<RollResult> {
        let id = pending.character_id.clone();
        self.with_lock(&id, || {
            let mut record = self.load_settled(&id)?;

            let mut dice = self.dice.lock().unwrap_or_else(PoisonError::into_inner);
            let mut host = Host {
                dice: &mut **dice,
                chat: self.chat.as_ref(),
                calendar: self.calendar.as_deref(),
                localizer: self.localizer.as_ref(),
            };

            match pending.resolve(&mut record, &self.config, selection, &mut host) {
                Ok(result) => {
                    self.store.save(&record)?;
                    Ok(result)
                }
                Err(e) if e.is_rejection() => {
                    tracing::info!("{}: roll rejected: {}", record.id, e);
                    Err(e.into())
                }
                Err(e) => {
                    tracing::warn!("{}: roll failed after spending: {}", record.id, e);
                    self.store.save(&record)?;
                    Err(e.into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::SkillSet;
    use crate::host::{ChatLog, ReminderLog, ScriptedDice};
    use crate::store::MemoryStore;
    use crate::types::{HuntFrequency, RollMode};

    fn service(dice: ScriptedDice) -> (SheetService<MemoryStore>, Arc<ChatLog>) {
        let chat = Arc::new(ChatLog::new());
        let service = SheetService::new(SheetConfig::default(), MemoryStore::new(), dice, chat.clone());
        (service, chat)
    }

    fn sacred() -> DialogSelection {
        DialogSelection {
            mode: RollMode::Sacred,
            modifier_index: None,
        }
    }

    #[test]
    fn test_update_derives_and_persists() {
        let (service, _) = service(ScriptedDice::default());
        let calendar = Arc::new(ReminderLog::new());
        let service = service.with_calendar(calendar.clone());
        let record = CharacterRecord::new("pc", "Iara", service.config());
        service.create(record).unwrap();

        let (record, report) = service
            .update("pc", |r| r.attributes.corruption = 10)
            .unwrap();
        assert_eq!(report.threshold_crossed, Some(HuntFrequency::Daily));
        assert_eq!(record.corruption_state.penalty_tier, 3);
        assert_eq!(service.get("pc").unwrap(), record);
        assert_eq!(calendar.reminders()[0].offset_days, 1);
    }

    #[test]
    fn test_get_settles_host_written_record() {
        let (service, _) = service(ScriptedDice::default());
        let mut junk = CharacterRecord::new("pc", "Iara", service.config());
        junk.attributes.humanity = 10;
        junk.pool.current = None;
        service.store().save(&junk).unwrap();

        let settled = service.get("pc").unwrap();
        assert_eq!(settled.attributes.bestiality, 2);
        assert_eq!(settled.pool.current, Some(3));
        assert_eq!(service.store().load("pc").unwrap(), settled);
    }

    #[test]
    fn test_roll_round_trip() {
        let (service, chat) = service(ScriptedDice::new([5, 7]));
        let record = CharacterRecord::new("pc", "Iara", service.config())
            .with_skills(SkillSet::new().with("melee", 3));
        service.create(record).unwrap();

        let pending = service.initiate_roll("pc", "melee").unwrap();
        let result = service.resolve_roll(pending, sacred()).unwrap();
        assert_eq!(result.total, 13);

        let stored = service.get("pc").unwrap();
        assert_eq!(stored.pool.current, Some(6));
        assert_eq!(stored.history.rolls().count(), 1);
        assert_eq!(chat.messages()[0].speaker, "pc");
    }

    #[test]
    fn test_failed_roll_still_persists_spent_point() {
        let (service, _) = service(ScriptedDice::new([4]));
        service
            .create(CharacterRecord::new("pc", "Iara", service.config()))
            .unwrap();

        let pending = service.initiate_roll("pc", "melee").unwrap();
        let err = service.resolve_roll(pending, sacred()).unwrap_err();
        assert!(matches!(err, ServiceError::Roll(RollError::Dice(_))));
        assert_eq!(service.get("pc").unwrap().pool.current, Some(6));
    }

    #[test]
    fn test_second_pending_roll_cannot_overspend() {
        let (service, _) = service(ScriptedDice::new([1, 1, 1, 1]));
        let mut record = CharacterRecord::new("pc", "Iara", service.config());
        record.pool.current = Some(1);
        service.create(record).unwrap();

        let first = service.initiate_roll("pc", "melee").unwrap();
        let second = service.initiate_roll("pc", "melee").unwrap();
        service.resolve_roll(first, sacred()).unwrap();
        let err = service.resolve_roll(second, sacred()).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Roll(RollError::NoResourceAvailable { .. })
        ));
        assert_eq!(service.get("pc").unwrap().history.rolls().count(), 1);
    }

    #[test]
    fn test_unknown_character() {
        let (service, _) = service(ScriptedDice::default());
        assert!(matches!(
            service.initiate_roll("nobody", "melee"),
            Err(ServiceError::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn test_delete() {
        let (service, _) = service(ScriptedDice::default());
        service
            .create(CharacterRecord::new("pc", "Iara", service.config()))
            .unwrap();
        service.delete("pc").unwrap();
        assert!(service.get("pc").is_err());
    }

    #[test]
    fn test_delete_keeps_lock_shared_with_waiters() {
        let (service, _) = service(ScriptedDice::default());
        service
            .create(CharacterRecord::new("pc", "Iara", service.config()))
            .unwrap();

        let held = service.character_lock("pc");
        service.delete("pc").unwrap();
        let next = service.character_lock("pc");
        assert!(Arc::ptr_eq(&held, &next));
    }

    #[test]
    fn test_lock_table_does_not_grow_on_missing_ids() {
        let (service, _) = service(ScriptedDice::default());
        for i in 0..100 {
            assert!(service.get(&format!("ghost-{}", i)).is_err());
        }
        service
            .create(CharacterRecord::new("pc", "Iara", service.config()))
            .unwrap();
        service.get("pc").unwrap();
        assert!(service.locks.lock().unwrap().is_empty());
    }

    #[test]
    fn test_update_cannot_rename() {
        let (service, _) = service(ScriptedDice::default());
        service
            .create(CharacterRecord::new("pc", "Iara", service.config()))
            .unwrap();

        let err = service
            .update("pc", |r| r.id = "other".to_string())
            .unwrap_err();
        assert!(matches!(err, ServiceError::IdChanged { .. }));
        assert!(service.store().load("other").is_err());
        assert_eq!(service.get("pc").unwrap().id, "pc");
    }
}
