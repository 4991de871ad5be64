//! List subcommand for trick-sync CLI

use crate::format::OutputFormat;
use clap::Args;

/// Arguments for the list subcommand
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Category to print (e.g. "Mini Ramp")
    pub category: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Highest difficulty to print (default: list.max_difficulty)
    #[arg(long)]
    pub max_difficulty: Option<i64>,
}
