//! CLI command definitions for trick-sync
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod fetch;
pub mod import;
pub mod list;

use clap::{Parser, Subcommand};
use fetch::FetchArgs;
use import::{ImportArgs, ImportCsvArgs};
use list::ListArgs;

/// Sync skateboard trick difficulty ratings into the game's trick database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile Trello board exports into the trick table
    Import(ImportArgs),

    /// Replace all non-special tricks with the rows of a CSV file
    ImportCsv(ImportCsvArgs),

    /// Download the configured Trello boards
    Fetch(FetchArgs),

    /// Print a category's tricks grouped by difficulty
    List(ListArgs),

    /// Restore the trick table from the backup taken by the last run
    Restore,
}
