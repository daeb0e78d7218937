//! The `mocktrack clear` command.

use anyhow::Result;

use mocktrack_core::model::TestNumber;

use super::{open_session, GlobalOpts};

pub fn execute(
    opts: &GlobalOpts,
    platform: Option<String>,
    series: Option<String>,
    test_number: Option<String>,
    all: bool,
) -> Result<()> {
    let config = opts.load_config()?;
    let catalog = &config.catalog;
    let mut session = open_session(&config.data_dir)?;

    if all {
        let count = session.ledger().record_count();
        session.clear_all();
        session.close()?;
        println!("Cleared {count} recorded attempt(s).");
        return Ok(());
    }

    let platform =
        catalog.resolve_platform(platform.as_deref().unwrap_or(&config.default_platform))?;
    let series = catalog.resolve_series(series.as_deref().unwrap_or(&config.default_series))?;
    let Some(test_number) = test_number else {
        anyhow::bail!("either --test or --all is required");
    };
    let test: TestNumber = test_number.parse()?;

    let removed = session.clear_test(&platform, &series, test);
    session.close()?;

    let (p, s) = (catalog.platform_name(&platform), catalog.series_name(&series));
    if removed {
        println!("Cleared test {test} for {p} / {s}");
    } else {
        println!("Nothing recorded for test {test} in {p} / {s}");
    }

    Ok(())
}
