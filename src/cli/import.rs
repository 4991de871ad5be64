//! Import subcommands for trick-sync CLI
//!
//! `import` reconciles Trello board exports card by card; `import-csv`
//! reloads the whole table from a CSV file.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the import subcommand
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Board export files (.json or .json.gz) or directories containing them
    ///
    /// Defaults to the configured JSON directory.
    #[arg(value_name = "FILE|DIR")]
    pub paths: Vec<PathBuf>,

    /// Category to file every card under (default: each board's name)
    #[arg(long)]
    pub category: Option<String>,

    /// Do not snapshot the trick table before importing
    #[arg(long)]
    pub no_backup: bool,
}

impl ImportArgs {
    /// Paths to import, falling back to `default_dir` when none were given.
    pub fn paths_or(&self, default_dir: &std::path::Path) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![default_dir.to_path_buf()]
        } else {
            self.paths.clone()
        }
    }
}

/// Arguments for the import-csv subcommand
#[derive(Args, Debug)]
pub struct ImportCsvArgs {
    /// CSV file with a header row (Name, Category, Difficulty, ...)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
