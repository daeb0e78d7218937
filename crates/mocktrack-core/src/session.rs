//! Session-scoped ownership of the ledger.
//!
//! A [`Session`] restores the ledger from a store when opened, applies
//! mutations, and writes the ledger back on [`Session::save`] or
//! [`Session::close`]. [`SharedSession`] puts one lock around a session so
//! that each read-modify-write runs alone and readers never see a half
//! applied mutation.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};

use crate::error::LedgerError;
use crate::ledger::{Ledger, RecordOutcome};
use crate::model::{Platform, Series, Submission, TestNumber};
use crate::store::{MemoryStore, SlotStore, LEDGER_SLOT};
use crate::trend::Trend;

/// Owns the ledger for the lifetime of one session.
pub struct Session {
    ledger: Ledger,
    store: Box<dyn SlotStore>,
    dirty: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store.describe())
            .field("records", &self.ledger.record_count())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Session {
    /// Open a session, restoring the ledger from the store if present.
    pub fn open(store: Box<dyn SlotStore>) -> Result<Self> {
        let ledger = match store.load(LEDGER_SLOT)? {
            Some(json) => Ledger::from_json(&json)
                .with_context(|| format!("failed to restore ledger from {}", store.describe()))?,
            None => Ledger::new(),
        };
        tracing::debug!(
            store = %store.describe(),
            records = ledger.record_count(),
            "opened session"
        );
        Ok(Self {
            ledger,
            store,
            dirty: false,
        })
    }

    /// A session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            ledger: Ledger::new(),
            store: Box::new(MemoryStore::new()),
            dirty: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn record(&mut self, submission: &Submission) -> Result<RecordOutcome, LedgerError> {
        let outcome = self.ledger.record_attempt(submission)?;
        self.dirty = true;
        Ok(outcome)
    }

    /// Remove a test number's attempts. Returns whether anything was removed.
    pub fn clear_test(&mut self, platform: &Platform, series: &Series, test: TestNumber) -> bool {
        let removed = self.ledger.clear_test(platform, series, test);
        self.dirty |= removed;
        removed
    }

    pub fn clear_all(&mut self) {
        if !self.ledger.is_empty() {
            self.ledger.clear_all();
            self.dirty = true;
        }
    }

    /// Persist the ledger if it changed since the last save.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let json = self.ledger.to_json()?;
        self.store
            .save(LEDGER_SLOT, &json)
            .with_context(|| format!("failed to save ledger to {}", self.store.describe()))?;
        self.dirty = false;
        tracing::debug!(records = self.ledger.record_count(), "saved ledger");
        Ok(())
    }

    /// Save and end the session.
    pub fn close(mut self) -> Result<()> {
        self.save()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.dirty {
            tracing::warn!("session dropped with unsaved changes");
        }
    }
}

/// A session shared between threads behind a single lock.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Session>> {
        self.inner
            .read()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Session>> {
        self.inner
            .write()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))
    }

    pub fn record(&self, submission: &Submission) -> Result<RecordOutcome> {
        Ok(self.write()?.record(submission)?)
    }

    pub fn clear_test(&self, platform: &Platform, series: &Series, test: TestNumber) -> Result<bool> {
        Ok(self.write()?.clear_test(platform, series, test))
    }

    pub fn latest_attempt_trend(&self, platform: &Platform, series: &Series) -> Result<Option<Trend>> {
        Ok(self.read()?.ledger().latest_attempt_trend(platform, series))
    }

    pub fn reattempt_trend(&self, platform: &Platform, series: &Series) -> Result<Option<Trend>> {
        Ok(self.read()?.ledger().reattempt_trend(platform, series))
    }

    /// Run a read-only closure against the ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> Result<R> {
        Ok(f(self.read()?.ledger()))
    }

    pub fn save(&self) -> Result<()> {
        self.write()?.save()
    }

    /// Recover the session once every other handle is gone.
    pub fn into_inner(self) -> Result<Session> {
        let lock = Arc::try_unwrap(self.inner)
            .map_err(|_| anyhow::anyhow!("session is still shared"))?;
        lock.into_inner()
            .map_err(|_| anyhow::anyhow!("session lock poisoned"))
    }
}
