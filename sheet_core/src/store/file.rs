//! File-based CharacterStore
//!
//! One pretty-printed JSON document per character:
//! ```text
//! {base_dir}/{id}.json
//! ```

use super::{CharacterStore, Result, StoreError};
use crate::character::CharacterRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Ids become file names, so keep them to a safe character set
    fn record_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.json", id)))
    }
}

impl CharacterStore for JsonFileStore {
    fn load(&self, id: &str) -> Result<CharacterRecord> {
        let path = self.record_path(id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, record: &CharacterRecord) -> Result<()> {
        let path = self.record_path(&record.id)?;
        let json = serde_json::to_string_pretty(record)?;
        // Written beside the target, then renamed over it
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.record_path(id)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, id: &str) -> bool {
        self.record_path(id).map(|p| p.exists()).unwrap_or(false)
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
