//! mocktrack CLI — record practice-test scores and chart their trends.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::trend::TrendFormat;
use commands::{GlobalOpts, OutputFormat};

#[derive(Parser)]
#[command(name = "mocktrack", version, about = "Practice test score tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the score ledger (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the scores of one attempt (overwrites the same attempt)
    Record {
        /// Platform id or name (default from config)
        #[arg(long)]
        platform: Option<String>,

        /// Series id or name (default from config)
        #[arg(long)]
        series: Option<String>,

        /// Test number
        #[arg(long = "test", allow_hyphen_values = true)]
        test_number: String,

        /// Attempt number
        #[arg(long = "attempt", allow_hyphen_values = true)]
        attempt_number: String,

        /// Quantitative score
        #[arg(long, allow_hyphen_values = true)]
        quantitative: String,

        /// Reasoning score
        #[arg(long, allow_hyphen_values = true)]
        reasoning: String,

        /// English score
        #[arg(long, allow_hyphen_values = true)]
        english: String,

        /// Mark this attempt as a reattempt
        #[arg(long)]
        reattempt: bool,
    },

    /// Delete every attempt of a test, or the whole ledger
    Clear {
        /// Platform id or name (default from config)
        #[arg(long)]
        platform: Option<String>,

        /// Series id or name (default from config)
        #[arg(long)]
        series: Option<String>,

        /// Test number to clear
        #[arg(long = "test", required_unless_present = "all")]
        test_number: Option<String>,

        /// Clear every recorded score
        #[arg(long, conflicts_with = "test_number")]
        all: bool,
    },

    /// Show the score trend of one series
    Trend {
        /// Platform id or name (default from config)
        #[arg(long)]
        platform: Option<String>,

        /// Series id or name (default from config)
        #[arg(long)]
        series: Option<String>,

        /// Show only attempts flagged as reattempts
        #[arg(long)]
        reattempt: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: TrendFormat,
    },

    /// List every series with recorded scores
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show configured platforms, series and score limits
    Catalog,

    /// Create a starter config file
    Init,
}

fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "mocktrack=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = GlobalOpts {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Record {
            platform,
            series,
            test_number,
            attempt_number,
            quantitative,
            reasoning,
            english,
            reattempt,
        } => commands::record::execute(
            &opts,
            commands::record::RecordArgs {
                platform,
                series,
                test_number,
                attempt_number,
                quantitative,
                reasoning,
                english,
                reattempt,
            },
        ),
        Commands::Clear {
            platform,
            series,
            test_number,
            all,
        } => commands::clear::execute(&opts, platform, series, test_number, all),
        Commands::Trend {
            platform,
            series,
            reattempt,
            format,
        } => commands::trend::execute(&opts, platform, series, reattempt, format),
        Commands::List { format } => commands::list::execute(&opts, format),
        Commands::Catalog => commands::catalog::execute(&opts),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
