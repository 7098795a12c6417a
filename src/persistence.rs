//! Durable storage for the book ledger.
//!
//! The durable record is a JSON array of block records in chain order, each
//! carrying `index`, `data`, `timestamp`, `previous_hash`, and `hash`. Stored
//! hashes are written verbatim and restored verbatim: `load` never recomputes
//! them, so tampering with the record between save and load is still caught
//! by a later `is_valid` scan instead of being silently healed on ingest.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::ledger::{Block, Ledger};

/// Abstraction for durable ledger storage backends.
///
/// `load` must yield a fresh genesis ledger when no record exists yet; a
/// record that exists but cannot be read is surfaced as an error, and any
/// fallback to genesis on corruption is the caller's explicit policy
/// decision.
pub trait LedgerStore: Send + Sync {
    fn save(&self, ledger: &Ledger) -> Result<()>;
    fn load(&self) -> Result<Ledger>;
}

/// File-backed store holding the ledger as a single JSON document.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger.blocks())
            .map_err(|e| LedgerError::StorageError(format!("failed to serialize ledger: {}", e)))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        // Stage next to the destination and rename into place, so a reader
        // never observes a partially written chain.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged
            .persist(&self.path)
            .map_err(|e| LedgerError::IoError(format!("failed to replace {}: {}", self.path.display(), e)))?;

        debug!("saved {} blocks to {}", ledger.len(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            info!(
                "no ledger record at {}, starting from genesis",
                self.path.display()
            );
            return Ok(Ledger::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let blocks: Vec<Block> = serde_json::from_str(&raw).map_err(|e| {
            LedgerError::MalformedRecord(format!("{}: {}", self.path.display(), e))
        })?;

        let ledger = Ledger::from_blocks(blocks)?;
        debug!("loaded {} blocks from {}", ledger.len(), self.path.display());
        Ok(ledger)
    }
}

/// Simple in-memory store useful for tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    blocks: Arc<Mutex<Option<Vec<Block>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryStore {
    fn save(&self, ledger: &Ledger) -> Result<()> {
        let mut slot = self
            .blocks
            .lock()
            .map_err(|_| LedgerError::StorageError("Mutex poisoned".to_string()))?;
        *slot = Some(ledger.blocks().to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Ledger> {
        let slot = self
            .blocks
            .lock()
            .map_err(|_| LedgerError::StorageError("Mutex poisoned".to_string()))?;
        match slot.as_ref() {
            Some(blocks) => Ledger::from_blocks(blocks.clone()),
            None => Ok(Ledger::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BookIssue;
    use tempfile::TempDir;

    fn issued_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(
            BookIssue::new("Dune", "Alice", "2024-01-01")
                .unwrap()
                .into_payload(),
        );
        ledger
    }

    #[test]
    fn test_missing_file_falls_back_to_genesis() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let ledger = store.load().unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.latest().is_genesis());
        assert!(ledger.is_valid());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let ledger = issued_ledger();
        store.save(&ledger).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored, ledger);
        assert!(restored.is_valid());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data/ledger.json"));

        store.save(&issued_ledger()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        match store.load() {
            Err(LedgerError::MalformedRecord(_)) => {}
            other => panic!("expected MalformedRecord, got {:?}", other.map(|l| l.len())),
        }
    }

    #[test]
    fn test_empty_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "[]").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_in_memory_store_round_trip() {
        let store = InMemoryStore::new();

        // Nothing saved yet: genesis fallback.
        assert_eq!(store.load().unwrap().len(), 1);

        let ledger = issued_ledger();
        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), ledger);
    }
}
