//! The `mocktrack trend` command.

use anyhow::Result;

use mocktrack_core::trend::{Trend, TrendKind};

use super::{open_session, GlobalOpts};

/// Output format for `mocktrack trend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TrendFormat {
    Text,
    Json,
    Markdown,
    /// Labels plus named datasets, ready for a line chart
    Chart,
}

pub fn execute(
    opts: &GlobalOpts,
    platform: Option<String>,
    series: Option<String>,
    reattempt: bool,
    format: TrendFormat,
) -> Result<()> {
    let config = opts.load_config()?;
    let catalog = &config.catalog;
    let platform =
        catalog.resolve_platform(platform.as_deref().unwrap_or(&config.default_platform))?;
    let series = catalog.resolve_series(series.as_deref().unwrap_or(&config.default_series))?;

    let session = open_session(&config.data_dir)?;
    let ledger = session.ledger();
    let trend = if reattempt {
        ledger.reattempt_trend(&platform, &series)
    } else {
        ledger.latest_attempt_trend(&platform, &series)
    };

    let title = format!(
        "{} / {}",
        catalog.platform_name(&platform),
        catalog.series_name(&series)
    );

    let Some(trend) = trend else {
        match format {
            TrendFormat::Json | TrendFormat::Chart => println!("null"),
            _ => println!("No data for {title}"),
        }
        return Ok(());
    };

    match format {
        TrendFormat::Json => println!("{}", serde_json::to_string_pretty(&trend)?),
        TrendFormat::Chart => println!("{}", serde_json::to_string_pretty(&to_chart(&trend))?),
        TrendFormat::Markdown => print!("{}", to_markdown(&trend, &title)),
        TrendFormat::Text => print_table(&trend, &title),
    }

    Ok(())
}

fn heading(trend: &Trend) -> &'static str {
    match trend.kind {
        TrendKind::Latest => "Latest attempts",
        TrendKind::Reattempt => "Reattempts",
    }
}

fn print_table(trend: &Trend, title: &str) {
    use comfy_table::{Cell, Table};

    println!("{}: {title}", heading(trend));
    if trend.is_empty() {
        println!("No reattempts recorded.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Test", "Quantitative", "Reasoning", "English", "Total"]);
    for p in trend.points() {
        table.add_row(vec![
            Cell::new(p.test),
            Cell::new(p.quantitative),
            Cell::new(p.reasoning),
            Cell::new(p.english),
            Cell::new(p.total),
        ]);
    }
    println!("{table}");
}

fn to_chart(trend: &Trend) -> serde_json::Value {
    serde_json::json!({
        "kind": trend.kind,
        "labels": trend.labels,
        "datasets": trend.datasets(),
    })
}

fn to_markdown(trend: &Trend, title: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!("### {}: {title}\n\n", heading(trend)));
    md.push_str("| Test | Quantitative | Reasoning | English | Total |\n");
    md.push_str("|------|--------------|-----------|---------|-------|\n");
    for p in trend.points() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            p.test, p.quantitative, p.reasoning, p.english, p.total
        ));
    }
    md
}
