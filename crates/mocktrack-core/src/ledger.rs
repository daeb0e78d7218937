//! The hierarchical score ledger.
//!
//! Scores live in a four-level tree owned by value:
//! `Platform → Series → TestNumber → [AttemptEntry]`.
//!
//! The per-test-number attempt list is kept in insertion order. The trend
//! projector treats the last entry as the latest attempt, which is not
//! necessarily the highest attempt number. Do not swap the `Vec` for a
//! sorted or hashed map.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LedgerError;
use crate::model::{AttemptEntry, AttemptNumber, Platform, ScoreRecord, Series, Submission, TestNumber};
use crate::trend::{self, Trend};

type TestMap = BTreeMap<TestNumber, Vec<AttemptEntry>>;

/// Every recorded attempt, keyed by platform, series, test number and attempt.
///
/// Deserializing a ledger normalizes it, so restored data obeys the same
/// invariants as data written through [`Ledger::record_attempt`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    platforms: BTreeMap<Platform, BTreeMap<Series, TestMap>>,
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let platforms = BTreeMap::deserialize(deserializer)?;
        let mut ledger = Ledger { platforms };
        ledger.normalize();
        Ok(ledger)
    }
}

/// Whether [`Ledger::record_attempt`] added a new attempt or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted,
    Overwritten,
}

/// Summary of one (platform, series) slice, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceSummary {
    pub platform: Platform,
    pub series: Series,
    pub tests: usize,
    pub attempts: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt, overwriting any record at the same attempt key.
    ///
    /// Input is validated before anything is touched, so a rejected
    /// submission creates no intermediate level.
    pub fn record_attempt(&mut self, submission: &Submission) -> Result<RecordOutcome, LedgerError> {
        let (test, attempt, record) = submission.validate()?;

        let attempts = self
            .platforms
            .entry(submission.platform.clone())
            .or_default()
            .entry(submission.series.clone())
            .or_default()
            .entry(test)
            .or_default();

        match attempts.iter_mut().find(|e| e.attempt == attempt) {
            Some(existing) => {
                tracing::debug!(
                    platform = %submission.platform,
                    series = %submission.series,
                    test = %test,
                    attempt = %attempt,
                    "overwriting recorded attempt"
                );
                existing.record = record;
                Ok(RecordOutcome::Overwritten)
            }
            None => {
                tracing::debug!(
                    platform = %submission.platform,
                    series = %submission.series,
                    test = %test,
                    attempt = %attempt,
                    total = record.total_score(),
                    "recorded attempt"
                );
                attempts.push(AttemptEntry { attempt, record });
                Ok(RecordOutcome::Inserted)
            }
        }
    }

    /// Remove every attempt recorded under one test number.
    ///
    /// Idempotent: returns `false` and changes nothing if the test is absent.
    /// Series and platform maps left empty by the removal are pruned too.
    pub fn clear_test(&mut self, platform: &Platform, series: &Series, test: TestNumber) -> bool {
        let Some(series_map) = self.platforms.get_mut(platform) else {
            return false;
        };
        let Some(tests) = series_map.get_mut(series) else {
            return false;
        };
        if tests.remove(&test).is_none() {
            return false;
        }

        if tests.is_empty() {
            series_map.remove(series);
        }
        if series_map.is_empty() {
            self.platforms.remove(platform);
        }
        tracing::debug!(%platform, %series, %test, "cleared test");
        true
    }

    /// Drop every recorded attempt.
    pub fn clear_all(&mut self) {
        self.platforms.clear();
    }

    /// Read-only view of one (platform, series) pair, or `None` if nothing
    /// has been recorded there yet.
    pub fn series_slice(&self, platform: &Platform, series: &Series) -> Option<SeriesSlice<'_>> {
        let tests = self.platforms.get(platform)?.get(series)?;
        if tests.is_empty() {
            return None;
        }
        Some(SeriesSlice { tests })
    }

    /// Latest-attempt trend for one slice, or `None` when there is nothing to chart.
    pub fn latest_attempt_trend(&self, platform: &Platform, series: &Series) -> Option<Trend> {
        self.series_slice(platform, series)
            .map(|slice| trend::latest_attempt_trend(&slice))
    }

    /// Reattempt-only trend for one slice, or `None` when there is nothing to chart.
    pub fn reattempt_trend(&self, platform: &Platform, series: &Series) -> Option<Trend> {
        self.series_slice(platform, series)
            .map(|slice| trend::reattempt_trend(&slice))
    }

    pub fn get_attempt(
        &self,
        platform: &Platform,
        series: &Series,
        test: TestNumber,
        attempt: AttemptNumber,
    ) -> Option<&ScoreRecord> {
        self.platforms
            .get(platform)?
            .get(series)?
            .get(&test)?
            .iter()
            .find(|e| e.attempt == attempt)
            .map(|e| &e.record)
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Total number of stored attempts across all slices.
    pub fn record_count(&self) -> usize {
        self.platforms
            .values()
            .flat_map(|s| s.values())
            .flat_map(|t| t.values())
            .map(Vec::len)
            .sum()
    }

    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.keys()
    }

    /// Every non-empty slice with its test and attempt counts.
    pub fn slices(&self) -> Vec<SliceSummary> {
        let mut out = Vec::new();
        for (platform, series_map) in &self.platforms {
            for (series, tests) in series_map {
                if tests.is_empty() {
                    continue;
                }
                out.push(SliceSummary {
                    platform: platform.clone(),
                    series: series.clone(),
                    tests: tests.len(),
                    attempts: tests.values().map(Vec::len).sum(),
                });
            }
        }
        out
    }

    /// Serialize the whole ledger as a nested JSON object.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string(self).map_err(|e| LedgerError::Persistence(e.to_string()))
    }

    /// Restore a ledger previously produced by [`Ledger::to_json`].
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(json).map_err(|e| LedgerError::Persistence(e.to_string()))
    }

    /// Enforce the in-memory invariants on restored data: empty levels are
    /// dropped and duplicate attempt numbers keep their first position with
    /// the last written record.
    fn normalize(&mut self) {
        for series_map in self.platforms.values_mut() {
            for tests in series_map.values_mut() {
                for attempts in tests.values_mut() {
                    let mut unique: Vec<AttemptEntry> = Vec::with_capacity(attempts.len());
                    for entry in attempts.drain(..) {
                        match unique.iter_mut().find(|e| e.attempt == entry.attempt) {
                            Some(existing) => {
                                tracing::warn!(attempt = %entry.attempt, "duplicate attempt in stored ledger");
                                existing.record = entry.record;
                            }
                            None => unique.push(entry),
                        }
                    }
                    *attempts = unique;
                }
                tests.retain(|_, attempts| !attempts.is_empty());
            }
            series_map.retain(|_, tests| !tests.is_empty());
        }
        self.platforms.retain(|_, series_map| !series_map.is_empty());
    }
}

/// Borrowed view of one (platform, series) subtree.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSlice<'a> {
    tests: &'a TestMap,
}

impl<'a> SeriesSlice<'a> {
    /// Test numbers in ascending numeric order, each with its attempts in
    /// insertion order.
    pub fn tests(&self) -> impl Iterator<Item = (TestNumber, &'a [AttemptEntry])> + 'a {
        self.tests.iter().map(|(t, a)| (*t, a.as_slice()))
    }

    /// The most recently inserted attempt for a test number.
    pub fn latest(&self, test: TestNumber) -> Option<&'a AttemptEntry> {
        self.tests.get(&test)?.last()
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }
}
