//! Key-value persistence for the ledger.
//!
//! A store maps slot names to serialized text. The ledger occupies a single
//! slot, [`LEDGER_SLOT`], holding the entire nested structure.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Slot holding the serialized ledger.
pub const LEDGER_SLOT: &str = "testData";

/// Trait for durable key-value backends.
pub trait SlotStore: Send + Sync {
    /// Human-readable backend description (for logs).
    fn describe(&self) -> String;

    /// Read a slot, or `None` if it has never been written.
    fn load(&self, slot: &str) -> Result<Option<String>>;

    /// Replace a slot's contents.
    fn save(&self, slot: &str, contents: &str) -> Result<()>;

    /// Delete a slot. Removing a missing slot is not an error.
    fn remove(&self, slot: &str) -> Result<()>;
}

fn check_slot_name(slot: &str) -> Result<()> {
    let ok = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !ok {
        anyhow::bail!("invalid slot name: {slot:?}");
    }
    Ok(())
}

/// Stores each slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl SlotStore for FileStore {
    fn describe(&self) -> String {
        format!("file store at {}", self.dir.display())
    }

    fn load(&self, slot: &str) -> Result<Option<String>> {
        check_slot_name(slot)?;
        let path = self.slot_path(slot);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn save(&self, slot: &str, contents: &str) -> Result<()> {
        check_slot_name(slot)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data directory {}", self.dir.display()))?;

        // Write to a sibling temp file, then rename over the slot.
        let path = self.slot_path(slot);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("failed to create temp file in {}", self.dir.display()))?;
        tmp.write_all(contents.as_bytes())
            .context("failed to write slot contents")?;
        tmp.as_file().sync_all().context("failed to flush slot contents")?;
        tmp.persist(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        check_slot_name(slot)?;
        let path = self.slot_path(slot);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
        }
    }
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl SlotStore for MemoryStore {
    fn describe(&self) -> String {
        "memory store".into()
    }

    fn load(&self, slot: &str) -> Result<Option<String>> {
        check_slot_name(slot)?;
        Ok(self.slots()?.get(slot).cloned())
    }

    fn save(&self, slot: &str, contents: &str) -> Result<()> {
        check_slot_name(slot)?;
        self.slots()?.insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        check_slot_name(slot)?;
        self.slots()?.remove(slot);
        Ok(())
    }
}
