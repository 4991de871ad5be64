//! Readers for the external trick sources.

pub mod csv;
pub mod trello;

pub use trello::{Board, BoardCards, Card, List};
