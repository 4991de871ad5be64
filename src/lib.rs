//! Trick difficulty sync library
//!
//! Reconciles Trello board exports and trick CSVs into the game's SQLite
//! trick table. This module exports the core components for testing and
//! integration.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod format;
pub mod import;
pub mod reconcile;
pub mod source;
pub mod types;
