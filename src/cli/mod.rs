use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use pressure_rise::dataset::{extract_with_report, Dataset};

mod config;
mod export;
mod fit;
mod summary;

pub use config::{Config, Overrides, Source};

/// pressure-rise - Pressure rise rates from a Raw Data workbook
#[derive(Parser)]
#[command(name = "pressure-rise")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where to read the trials from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to the .xlsx workbook (default: Data/Data.xlsx)
    #[arg(short = 'w', long, value_name = "XLSX")]
    workbook: Option<PathBuf>,

    /// Name of the raw-data sheet (default: "Raw Data")
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Required number of trials, 0 accepts any count (default: 40)
    #[arg(long, value_name = "N")]
    expected_trials: Option<usize>,
}

impl From<SourceArgs> for Overrides {
    fn from(args: SourceArgs) -> Self {
        Overrides {
            workbook: args.workbook,
            sheet: args.sheet,
            expected_trials: args.expected_trials,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List every trial with its sample count and time/pressure spans
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the linear-fit pressure rise rate over [FROM, TO]
    Fit {
        #[command(flatten)]
        source: SourceArgs,

        /// Trial identifier, "<level>-<trial>" (see `summary`)
        #[arg(short, long, value_name = "ID")]
        trial: String,

        /// Interval start in seconds, inclusive
        #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
        from: f64,

        /// Interval end in seconds, inclusive
        #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
        to: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write every trial as JSON column arrays
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { source, json } => summary::run(config.resolve(source.into()), json),
        Commands::Fit {
            source,
            trial,
            from,
            to,
            json,
        } => fit::run(config.resolve(source.into()), &trial, from, to, json),
        Commands::Export {
            source,
            output,
            pretty,
        } => export::run(config.resolve(source.into()), output, pretty),
    }
}

/// Build the dataset; any failure here aborts the command.
fn load(source: &Source) -> Result<Dataset> {
    let (dataset, report) = extract_with_report(&source.workbook, &source.layout)
        .with_context(|| format!("Failed to load trials from {}", source.workbook.display()))?;
    info!(
        "{} trials, {} samples ({} rows scanned)",
        dataset.len(),
        dataset.total_samples(),
        report.rows_scanned
    );
    Ok(dataset)
}
