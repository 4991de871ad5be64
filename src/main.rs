//! trick-sync
//!
//! Pulls skateboard trick difficulty ratings from Trello boards and CSV
//! files into the game's SQLite trick table.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use trick_sync::cli::fetch::FetchArgs;
use trick_sync::cli::import::{ImportArgs, ImportCsvArgs};
use trick_sync::cli::list::ListArgs;
use trick_sync::cli::{Cli, Command};
use trick_sync::config::{Config, ConfigLoader};
use trick_sync::db::Database;
use trick_sync::fetch::TrelloClient;
use trick_sync::format::{group_by_difficulty, render};
use trick_sync::import::{
    ImportOptions, import_board_files, import_csv, import_fetched_boards,
};
use trick_sync::types::ImportSummary;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // SAFETY: set at startup, before the runtime spawns any other thread
    if let Some(config_path) = &cli.config {
        unsafe {
            std::env::set_var("TRICK_SYNC_CONFIG_PATH", config_path);
        }
    }
    let mut loader = ConfigLoader::load()?;
    if let Some(path) = loader.config_path() {
        info!(path = %path.display(), "Using config file");
    }

    let config = loader.config_mut();
    if let Some(db_path) = &cli.database {
        config.database.path = db_path.into();
    }
    let config = loader.into_config();

    match cli.command {
        Command::Import(args) => run_import(&config, args),
        Command::ImportCsv(args) => run_import_csv(&config, args),
        Command::Fetch(args) => run_fetch(&config, args).await,
        Command::List(args) => run_list(&config, args),
        Command::Restore => run_restore(&config),
    }
}

fn open_database(config: &Config) -> Result<Database> {
    config.ensure_db_dir()?;
    Database::open(&config.database.path)
}

fn print_summaries(summaries: &[ImportSummary]) {
    for summary in summaries {
        println!(
            "{}: {} added, {} updated, {} skipped (list), {} skipped (card)",
            summary.category,
            summary.added,
            summary.updated,
            summary.skipped_list,
            summary.skipped_card
        );
    }
}

fn run_import(config: &Config, args: ImportArgs) -> Result<()> {
    let db = open_database(config)?;
    let options = ImportOptions {
        category: args.category.clone(),
        skip_backup: args.no_backup,
        null_sentinels: config.import.null_sentinels.clone(),
    };

    let paths = args.paths_or(&config.trello.json_dir);
    let summaries = import_board_files(&db, &paths, &options)?;
    if summaries.is_empty() {
        eprintln!("No board files found");
    }
    print_summaries(&summaries);

    db.close()
}

fn run_import_csv(config: &Config, args: ImportCsvArgs) -> Result<()> {
    let mut db = open_database(config)?;
    let summary = import_csv(&mut db, &args.file, &config.import.null_sentinels)?;

    println!(
        "Loaded {}: {} inserted, {} removed, {} special tricks kept",
        args.file.display(),
        summary.inserted,
        summary.deleted,
        summary.kept_special
    );

    db.close()
}

async fn run_fetch(config: &Config, args: FetchArgs) -> Result<()> {
    if config.trello.boards.is_empty() {
        warn!("No boards configured");
        return Ok(());
    }

    let client = TrelloClient::new(&config.trello)?;
    let out_dir = args.out.unwrap_or_else(|| config.trello.json_dir.clone());
    let written = client
        .fetch_all(&config.trello.boards, &out_dir)
        .await
        .context("Failed to download boards")?;

    for path in &written {
        println!("Wrote {}", path.display());
    }

    if args.import {
        let files: Vec<(PathBuf, String)> = written
            .into_iter()
            .zip(config.trello.boards.iter().map(|b| b.category.clone()))
            .collect();

        let db = open_database(config)?;
        let options = ImportOptions {
            null_sentinels: config.import.null_sentinels.clone(),
            ..ImportOptions::default()
        };
        let summaries = import_fetched_boards(&db, &files, &options)?;
        print_summaries(&summaries);
        db.close()?;
    }

    Ok(())
}

fn run_list(config: &Config, args: ListArgs) -> Result<()> {
    let db = open_database(config)?;
    let tricks = db.require_category_tricks(&args.category)?;

    let max_difficulty = args.max_difficulty.unwrap_or(config.list.max_difficulty);
    let groups = group_by_difficulty(&tricks, max_difficulty);
    print!("{}", render(&args.category, &groups, args.format));

    db.close()
}

fn run_restore(config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    let restored = db.restore_backup()?;
    println!("Restored {} tricks from backup", restored);
    db.close()
}
