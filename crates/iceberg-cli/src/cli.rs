use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report with bar charts
    Text,
    /// Machine-readable JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "iceberg-index")]
#[command(about = "Local AI disruption index for a US zip code", long_about = None)]
#[command(version)]
pub struct Args {
    /// Five-digit zip code (ZIP Code Tabulation Area) to analyze
    pub zip: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Read workforce tables from a recorded JSON fixture instead of the Census API
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Risk table override: JSON object mapping sector to weight in [0, 1]
    #[arg(long = "risk-table", env = "ICEBERG_RISK_TABLE")]
    pub risk_table: Option<PathBuf>,

    /// ACS 5-year vintage to query
    #[arg(long)]
    pub year: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
