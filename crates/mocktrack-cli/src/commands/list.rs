//! The `mocktrack list` command.

use anyhow::Result;

use super::{open_session, GlobalOpts, OutputFormat};

pub fn execute(opts: &GlobalOpts, format: OutputFormat) -> Result<()> {
    let config = opts.load_config()?;
    let catalog = &config.catalog;
    let session = open_session(&config.data_dir)?;
    let slices = session.ledger().slices();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&slices)?);
        }
        OutputFormat::Markdown => {
            println!("| Platform | Series | Tests | Attempts |");
            println!("|----------|--------|-------|----------|");
            for s in &slices {
                println!(
                    "| {} | {} | {} | {} |",
                    catalog.platform_name(&s.platform),
                    catalog.series_name(&s.series),
                    s.tests,
                    s.attempts
                );
            }
        }
        OutputFormat::Text => {
            if slices.is_empty() {
                println!("No scores recorded yet.");
                return Ok(());
            }
            for s in &slices {
                println!(
                    "{} / {}: {} test(s), {} attempt(s)",
                    catalog.platform_name(&s.platform),
                    catalog.series_name(&s.series),
                    s.tests,
                    s.attempts
                );
            }
        }
    }

    Ok(())
}
