//! Character persistence
//!
//! The host owns durable storage; these stores give the service something to
//! load from and save to. Records are stored whole, history included.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::character::CharacterRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("character not found: {0}")]
    NotFound(String),

    #[error("invalid character id: {0:?}")]
    InvalidId(String),

    #[error("character store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Load / save whole character records by id
pub trait CharacterStore: Send + Sync {
    fn load(&self, id: &str) -> Result<CharacterRecord>;

    fn save(&self, record: &CharacterRecord) -> Result<()>;

    fn delete(&self, id: &str) -> Result<()>;

    fn exists(&self, id: &str) -> bool {
        self.load(id).is_ok()
    }

    /// All stored ids, sorted
    fn list_ids(&self) -> Result<Vec<String>>;
}
