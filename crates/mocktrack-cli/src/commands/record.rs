//! The `mocktrack record` command.

use anyhow::Result;

use mocktrack_core::ledger::RecordOutcome;
use mocktrack_core::submission::RawSubmission;

use super::{open_session, GlobalOpts};

/// Raw form fields as typed on the command line.
pub struct RecordArgs {
    pub platform: Option<String>,
    pub series: Option<String>,
    pub test_number: String,
    pub attempt_number: String,
    pub quantitative: String,
    pub reasoning: String,
    pub english: String,
    pub reattempt: bool,
}

pub fn execute(opts: &GlobalOpts, args: RecordArgs) -> Result<()> {
    let config = opts.load_config()?;
    let catalog = &config.catalog;

    let raw = RawSubmission {
        platform: args.platform.unwrap_or_else(|| config.default_platform.clone()),
        series: args.series.unwrap_or_else(|| config.default_series.clone()),
        test_number: args.test_number,
        attempt_number: args.attempt_number,
        quantitative: args.quantitative,
        reasoning: args.reasoning,
        english: args.english,
        reattempt: args.reattempt,
    };
    let submission = raw.parse(catalog)?;

    let mut session = open_session(&config.data_dir)?;
    let outcome = session.record(&submission)?;
    session.close()?;

    let total = submission.scores.checked_total().unwrap_or_default();
    println!(
        "{} test {} attempt {}{} for {} / {}: total {}",
        match outcome {
            RecordOutcome::Overwritten => "Updated",
            RecordOutcome::Inserted => "Recorded",
        },
        submission.test_number,
        submission.attempt_number,
        if submission.is_reattempt {
            " (reattempt)"
        } else {
            ""
        },
        catalog.platform_name(&submission.platform),
        catalog.series_name(&submission.series),
        total,
    );

    Ok(())
}
