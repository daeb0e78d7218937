//! The `mocktrack catalog` command.

use anyhow::Result;

use mocktrack_core::catalog::validate_catalog;

use super::GlobalOpts;

fn limit(max: Option<u32>) -> String {
    match max {
        Some(n) if n > 0 => n.to_string(),
        _ => "-".to_string(),
    }
}

pub fn execute(opts: &GlobalOpts) -> Result<()> {
    let config = opts.load_config()?;
    let catalog = &config.catalog;

    println!("Platforms:");
    for p in &catalog.platforms {
        println!("  {:<12} {}", p.id, p.name);
    }

    println!("Series:");
    for s in &catalog.series {
        println!("  {:<12} {}", s.id, s.name);
    }

    let l = &catalog.limits;
    println!("Limits:");
    println!("  test number     {}", limit(l.max_test_number));
    println!("  attempt number  {}", limit(l.max_attempt_number));
    println!("  quantitative    {}", limit(l.max_quantitative));
    println!("  reasoning       {}", limit(l.max_reasoning));
    println!("  english         {}", limit(l.max_english));

    let warnings = validate_catalog(catalog);
    for w in &warnings {
        println!("WARNING: {}", w.message);
    }

    Ok(())
}
