//! Fetch subcommand for trick-sync CLI

use clap::Args;
use std::path::PathBuf;

/// Arguments for the fetch subcommand
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Directory to write board exports to (default: trello.json_dir)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Import the downloaded boards right away
    #[arg(long)]
    pub import: bool,
}
