//! High-score persistence.
//!
//! The score lives in a tiny JSON record, `{ "high_score": 42 }`. Reading it
//! never stops the game from starting: anything unreadable counts as 0.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

pub trait HighScoreStore {
    /// Stored high score, or 0 when there is none or it can't be read
    fn load(&self) -> u32;
    /// Overwrite the stored high score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// High score kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let record: HighScoreRecord = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(record.high_score)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        if !self.path.exists() {
            return 0;
        }
        self.read().unwrap_or_else(|e| {
            warn!("{e:#}; high score starts at 0");
            0
        })
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let text = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// In-memory store. Clones share the value, so a test can keep a handle
/// after giving one to the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.value.set(score);
        store
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// How many times `save` has been called
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("high_score.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.json");
        let mut store = JsonFileStore::new(&path);

        store.save(17).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"high_score":17}"#);
        assert_eq!(JsonFileStore::new(&path).load(), 17);
    }

    #[test]
    fn test_malformed_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.json");

        fs::write(&path, "garbage").unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);

        fs::write(&path, r#"{"best": 3}"#).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);

        fs::write(&path, r#"{"high_score": -4}"#).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        // a directory can't be overwritten as a file
        let mut store = JsonFileStore::new(dir.path());
        assert!(store.save(5).is_err());
    }

    #[test]
    fn test_memory_store_shared() {
        let store = MemoryStore::with_score(4);
        let mut engine_side = store.clone();
        engine_side.save(9).unwrap();
        assert_eq!(store.value(), 9);
        assert_eq!(store.saves(), 1);
    }
}
