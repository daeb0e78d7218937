//! Trend projection for charting.
//!
//! Converts one (platform, series) slice into parallel, numerically ordered
//! sequences: one for the latest attempt per test number and one holding
//! only attempts flagged as reattempts.

use serde::Serialize;

use crate::ledger::SeriesSlice;
use crate::model::{ScoreRecord, TestNumber};

/// Which projection produced a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Latest,
    Reattempt,
}

/// Chart-ready projection of a slice.
///
/// The projections fill `labels` and the four score sequences in lockstep.
/// For the reattempt trend a label repeats once per qualifying attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub kind: TrendKind,
    pub labels: Vec<TestNumber>,
    pub quantitative: Vec<u32>,
    pub reasoning: Vec<u32>,
    pub english: Vec<u32>,
    pub total: Vec<u32>,
}

/// One row of a trend: a label with its four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub test: TestNumber,
    pub quantitative: u32,
    pub reasoning: u32,
    pub english: u32,
    pub total: u32,
}

/// A named value series, as handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset<'a> {
    pub label: &'static str,
    pub data: &'a [u32],
}

impl Trend {
    fn empty(kind: TrendKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            quantitative: Vec::new(),
            reasoning: Vec::new(),
            english: Vec::new(),
            total: Vec::new(),
        }
    }

    fn push(&mut self, test: TestNumber, record: &ScoreRecord) {
        self.labels.push(test);
        self.quantitative.push(record.quantitative());
        self.reasoning.push(record.reasoning());
        self.english.push(record.english());
        self.total.push(record.total_score());
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row view over the parallel sequences. Stops at the shortest one.
    pub fn points(&self) -> impl Iterator<Item = TrendPoint> + '_ {
        self.labels
            .iter()
            .zip(&self.quantitative)
            .zip(&self.reasoning)
            .zip(&self.english)
            .zip(&self.total)
            .map(|((((&test, &quantitative), &reasoning), &english), &total)| TrendPoint {
                test,
                quantitative,
                reasoning,
                english,
                total,
            })
    }

    /// The four series with their chart legend names.
    pub fn datasets(&self) -> [Dataset<'_>; 4] {
        let names = match self.kind {
            TrendKind::Latest => ["Quantitative", "Reasoning", "English", "Total Score"],
            TrendKind::Reattempt => [
                "Reattempt Quantitative",
                "Reattempt Reasoning",
                "Reattempt English",
                "Reattempt Total Score",
            ],
        };
        [
            Dataset {
                label: names[0],
                data: &self.quantitative,
            },
            Dataset {
                label: names[1],
                data: &self.reasoning,
            },
            Dataset {
                label: names[2],
                data: &self.english,
            },
            Dataset {
                label: names[3],
                data: &self.total,
            },
        ]
    }
}

/// One value per test number, taken from the most recently inserted attempt.
pub fn latest_attempt_trend(slice: &SeriesSlice<'_>) -> Trend {
    let mut trend = Trend::empty(TrendKind::Latest);
    for (test, attempts) in slice.tests() {
        // Last in insertion order, not highest attempt number.
        if let Some(latest) = attempts.last() {
            trend.push(test, &latest.record);
        }
    }
    trend
}

/// Every attempt flagged as a reattempt, in test-number then insertion order.
pub fn reattempt_trend(slice: &SeriesSlice<'_>) -> Trend {
    let mut trend = Trend::empty(TrendKind::Reattempt);
    for (test, attempts) in slice.tests() {
        for entry in attempts.iter().filter(|e| e.record.is_reattempt()) {
            trend.push(test, &entry.record);
        }
    }
    trend
}
