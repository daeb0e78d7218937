//! The `mocktrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mocktrack.toml").exists() {
        println!("mocktrack.toml already exists, skipping.");
    } else {
        std::fs::write("mocktrack.toml", SAMPLE_CONFIG)?;
        println!("Created mocktrack.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit the catalog in mocktrack.toml if your platforms differ");
    println!("  2. Run: mocktrack record --test 1 --attempt 1 --quantitative 20 --reasoning 25 --english 15");
    println!("  3. Run: mocktrack trend");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mocktrack configuration

data_dir = "./mocktrack-data"
default_platform = "Platform 1"
default_series = "Series 1"

[catalog]
platforms = [
  { id = "Platform 1", name = "Testbook" },
  { id = "Platform 2", name = "Guidely" },
  { id = "Platform 3", name = "Smartkeeda" },
]
series = [
  { id = "Series 1", name = "RRB PO" },
  { id = "Series 2", name = "RRB Clerk" },
  { id = "Series 3", name = "IBPS PO" },
  { id = "Series 4", name = "IBPS Clerk" },
  { id = "Series 5", name = "SBI PO" },
  { id = "Series 6", name = "SBI Clerk" },
]

# Set a limit to 0 to disable it.
[catalog.limits]
max_test_number = 30
max_attempt_number = 10
max_quantitative = 35
max_reasoning = 35
max_english = 20
"#;
