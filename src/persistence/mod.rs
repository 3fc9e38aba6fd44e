//! Save/load persistence for scores and settings
//!
//! Features:
//! - Pluggable backends (file on disk, shared in-memory for tests)
//! - Atomic file writes (tmp → rename)
//! - JSON helpers; corrupt data is reported, never panics

pub mod file;
pub mod memory;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Failure reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl PersistError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single persisted slot holding one serialized record
pub trait Storage {
    /// Read the whole record. `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> PersistResult<Option<String>>;

    /// Replace the whole record. Must be durable when it returns `Ok`.
    fn write(&mut self, contents: &str) -> PersistResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Load and decode a JSON record. `Ok(None)` when the slot is empty.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage) -> PersistResult<Option<T>> {
    match storage.read()? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON record
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, value: &T) -> PersistResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    storage.write(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        value: u32,
    }

    #[test]
    fn test_json_roundtrip_through_memory() {
        let mut storage = MemoryStorage::new();
        assert!(load_json::<Record>(&storage).unwrap().is_none());

        save_json(&mut storage, &Record { value: 7 }).unwrap();
        let loaded: Option<Record> = load_json(&storage).unwrap();
        assert_eq!(loaded, Some(Record { value: 7 }));
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let storage = MemoryStorage::with_contents("{not json");
        let err = load_json::<Record>(&storage).unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
    }
}
