//! In-memory CharacterStore for tests and local runs

use super::{CharacterStore, Result, StoreError};
use crate::character::CharacterRecord;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, CharacterRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CharacterStore for MemoryStore {
    fn load(&self, id: &str) -> Result<CharacterRecord> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.remove(id);
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(id))
            .unwrap_or(false)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut ids: Vec<String> = records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;

    #[test]
    fn test_save_load_delete() {
        let store = MemoryStore::new();
        let record = CharacterRecord::new("b", "Bia", &SheetConfig::default());
        store.save(&record).unwrap();
        store
            .save(&CharacterRecord::new("a", "Ana", &SheetConfig::default()))
            .unwrap();

        assert_eq!(store.load("b").unwrap(), record);
        assert_eq!(store.list_ids().unwrap(), ["a", "b"]);

        store.delete("b").unwrap();
        assert!(!store.exists("b"));
        assert!(matches!(store.load("b"), Err(StoreError::NotFound(_))));
    }
}
