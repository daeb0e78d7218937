//! Core data model types for mocktrack.
//!
//! These are the identifiers and records stored in the ledger, plus the
//! validated submission value handed over by the entry boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// External test-provider identifier (e.g. "Platform 1").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

/// Exam-preparation track under a platform (e.g. "Series 1").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(Platform);
string_id!(Series);

/// Position of a practice test within a series. Always positive.
///
/// Ordering is numeric, so a map keyed by `TestNumber` enumerates
/// 1, 2, 9, 10 rather than 1, 10, 2, 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct TestNumber(u32);

/// Which attempt (1st, 2nd, ...) at a given test number. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct AttemptNumber(u32);

macro_rules! positive_number {
    ($name:ident, $field:literal) => {
        impl $name {
            /// Returns `None` for zero.
            pub fn new(n: u32) -> Option<Self> {
                (n > 0).then_some(Self(n))
            }

            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl TryFrom<u32> for $name {
            type Error = LedgerError;

            fn try_from(n: u32) -> Result<Self, Self::Error> {
                Self::new(n).ok_or_else(|| LedgerError::invalid($field, "must be positive"))
            }
        }

        impl From<$name> for u32 {
            fn from(n: $name) -> u32 {
                n.0
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_count($field, s)?.try_into()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_number!(TestNumber, "test number");
positive_number!(AttemptNumber, "attempt number");

/// Parse a non-negative integer form field.
pub(crate) fn parse_count(field: &'static str, raw: &str) -> Result<u32, LedgerError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(LedgerError::invalid(field, "is required"));
    }
    match s.parse::<i64>() {
        Ok(n) if n < 0 => Err(LedgerError::invalid(field, "must not be negative")),
        Ok(n) => u32::try_from(n).map_err(|_| LedgerError::invalid(field, "is too large")),
        Err(_) => Err(LedgerError::invalid(field, format!("not a number: {s:?}"))),
    }
}

/// The three subject scores of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectScores {
    pub quantitative: u32,
    pub reasoning: u32,
    pub english: u32,
}

impl SubjectScores {
    pub fn new(quantitative: u32, reasoning: u32, english: u32) -> Self {
        Self {
            quantitative,
            reasoning,
            english,
        }
    }

    /// Sum of the three subjects, or `None` on overflow.
    pub fn checked_total(&self) -> Option<u32> {
        self.quantitative
            .checked_add(self.reasoning)?
            .checked_add(self.english)
    }
}

/// One scored attempt.
///
/// The total is derived when the record is built and cannot be set on its
/// own, so `total_score() == quantitative + reasoning + english` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    scores: SubjectScores,
    total_score: u32,
    is_reattempt: bool,
}

impl ScoreRecord {
    pub fn new(scores: SubjectScores, is_reattempt: bool) -> Result<Self, LedgerError> {
        let total_score = scores
            .checked_total()
            .ok_or_else(|| LedgerError::invalid("total score", "overflows"))?;
        Ok(Self {
            scores,
            total_score,
            is_reattempt,
        })
    }

    pub fn scores(&self) -> SubjectScores {
        self.scores
    }

    pub fn quantitative(&self) -> u32 {
        self.scores.quantitative
    }

    pub fn reasoning(&self) -> u32 {
        self.scores.reasoning
    }

    pub fn english(&self) -> u32 {
        self.scores.english
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn is_reattempt(&self) -> bool {
        self.is_reattempt
    }
}

/// A validated score submission from the entry boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub platform: Platform,
    pub series: Series,
    pub test_number: u32,
    pub attempt_number: u32,
    pub scores: SubjectScores,
    #[serde(default)]
    pub is_reattempt: bool,
}

impl Submission {
    pub fn new(
        platform: impl Into<Platform>,
        series: impl Into<Series>,
        test_number: u32,
        attempt_number: u32,
        scores: SubjectScores,
    ) -> Self {
        Self {
            platform: platform.into(),
            series: series.into(),
            test_number,
            attempt_number,
            scores,
            is_reattempt: false,
        }
    }

    /// Mark this submission as a reattempt of an earlier test.
    pub fn reattempt(mut self, is_reattempt: bool) -> Self {
        self.is_reattempt = is_reattempt;
        self
    }

    /// Check the numeric preconditions and build the storage key and record.
    pub(crate) fn validate(&self) -> Result<(TestNumber, AttemptNumber, ScoreRecord), LedgerError> {
        let test = TestNumber::try_from(self.test_number)?;
        let attempt = AttemptNumber::try_from(self.attempt_number)?;
        let record = ScoreRecord::new(self.scores, self.is_reattempt)?;
        Ok((test, attempt, record))
    }
}

/// An attempt together with its attempt number, as stored per test number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "StoredAttempt", from = "StoredAttempt")]
pub struct AttemptEntry {
    pub attempt: AttemptNumber,
    pub record: ScoreRecord,
}

/// On-disk shape of an attempt. The stored total is informational only and
/// is recomputed on load.
#[derive(Serialize, Deserialize)]
struct StoredAttempt {
    attempt: AttemptNumber,
    quantitative: u32,
    reasoning: u32,
    english: u32,
    #[serde(rename = "totalScore", default)]
    total_score: Option<u64>,
    #[serde(default)]
    reattempt: bool,
}

impl From<AttemptEntry> for StoredAttempt {
    fn from(entry: AttemptEntry) -> Self {
        let r = entry.record;
        Self {
            attempt: entry.attempt,
            quantitative: r.quantitative(),
            reasoning: r.reasoning(),
            english: r.english(),
            total_score: Some(u64::from(r.total_score())),
            reattempt: r.is_reattempt(),
        }
    }
}

impl From<StoredAttempt> for AttemptEntry {
    fn from(s: StoredAttempt) -> Self {
        let scores = SubjectScores::new(s.quantitative, s.reasoning, s.english);
        let total = u64::from(s.quantitative) + u64::from(s.reasoning) + u64::from(s.english);
        if let Some(stored) = s.total_score.filter(|&t| t != total) {
            tracing::warn!(
                attempt = s.attempt.get(),
                stored,
                computed = total,
                "stored total disagrees with subject scores, recomputing"
            );
        }
        // Sums that overflow u32 are clamped; they cannot be produced by the ledger.
        let total_score = u32::try_from(total).unwrap_or(u32::MAX);
        AttemptEntry {
            attempt: s.attempt,
            record: ScoreRecord {
                scores,
                total_score,
                is_reattempt: s.reattempt,
            },
        }
    }
}
