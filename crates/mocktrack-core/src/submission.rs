//! Entry-boundary parsing of raw form fields.
//!
//! A form hands over every field as text. Parsing resolves the platform and
//! series through the catalog, checks numbers against the catalog limits, and
//! produces a [`Submission`] the ledger can store.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ScoreLimits};
use crate::error::LedgerError;
use crate::model::{parse_count, AttemptNumber, Platform, Series, SubjectScores, Submission, TestNumber};

/// Unvalidated submission fields, exactly as entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    pub platform: String,
    pub series: String,
    pub test_number: String,
    pub attempt_number: String,
    pub quantitative: String,
    pub reasoning: String,
    pub english: String,
    #[serde(default)]
    pub reattempt: bool,
}

impl RawSubmission {
    /// Validate every field and build a [`Submission`].
    ///
    /// The first failing field is reported; nothing is partially applied.
    pub fn parse(&self, catalog: &Catalog) -> Result<Submission, LedgerError> {
        let limits = &catalog.limits;
        let platform: Platform = catalog.resolve_platform(&self.platform)?;
        let series: Series = catalog.resolve_series(&self.series)?;

        let test: TestNumber = self.test_number.parse()?;
        let attempt: AttemptNumber = self.attempt_number.parse()?;
        ScoreLimits::check("test number", test.get(), limits.max_test_number)?;
        ScoreLimits::check("attempt number", attempt.get(), limits.max_attempt_number)?;

        let scores = SubjectScores {
            quantitative: ScoreLimits::check(
                "quantitative",
                parse_count("quantitative", &self.quantitative)?,
                limits.max_quantitative,
            )?,
            reasoning: ScoreLimits::check(
                "reasoning",
                parse_count("reasoning", &self.reasoning)?,
                limits.max_reasoning,
            )?,
            english: ScoreLimits::check(
                "english",
                parse_count("english", &self.english)?,
                limits.max_english,
            )?,
        };

        Ok(Submission {
            platform,
            series,
            test_number: test.get(),
            attempt_number: attempt.get(),
            scores,
            is_reattempt: self.reattempt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawSubmission {
        RawSubmission {
            platform: "Testbook".into(),
            series: "Series 3".into(),
            test_number: "10".into(),
            attempt_number: "2".into(),
            quantitative: "20".into(),
            reasoning: "15".into(),
            english: "10".into(),
            reattempt: true,
        }
    }

    #[test]
    fn parse_valid() {
        let sub = raw().parse(&Catalog::default()).unwrap();
        assert_eq!(sub.platform.as_str(), "Platform 1");
        assert_eq!(sub.series.as_str(), "Series 3");
        assert_eq!(sub.test_number, 10);
        assert_eq!(sub.attempt_number, 2);
        assert_eq!(sub.scores.checked_total(), Some(45));
        assert!(sub.is_reattempt);
    }

    #[test]
    fn parse_missing_field() {
        let mut r = raw();
        r.reasoning = "  ".into();
        let err = r.parse(&Catalog::default()).unwrap_err();
        assert_eq!(err.to_string(), "invalid reasoning: is required");
    }

    #[test]
    fn parse_negative_score() {
        let mut r = raw();
        r.english = "-4".into();
        let err = r.parse(&Catalog::default()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidScoreInput { field: "english", .. }));
    }

    #[test]
    fn parse_non_numeric() {
        let mut r = raw();
        r.quantitative = "twelve".into();
        assert!(r.parse(&Catalog::default()).is_err());
    }

    #[test]
    fn parse_zero_test_number() {
        let mut r = raw();
        r.test_number = "0".into();
        let err = r.parse(&Catalog::default()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidScoreInput { field: "test number", .. }));
    }

    #[test]
    fn parse_over_limit() {
        let mut r = raw();
        r.quantitative = "36".into();
        let err = r.parse(&Catalog::default()).unwrap_err();
        assert_eq!(err.to_string(), "invalid quantitative: 36 exceeds maximum of 35");

        let mut catalog = Catalog::default();
        catalog.limits = ScoreLimits::unbounded();
        assert!(r.parse(&catalog).is_ok());
    }

    #[test]
    fn parse_unknown_platform() {
        let mut r = raw();
        r.platform = "Nowhere".into();
        let err = r.parse(&Catalog::default()).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownCatalogEntry { kind: "platform", .. }));
    }
}
