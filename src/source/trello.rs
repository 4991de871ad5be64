//! Trello board export reader.
//!
//! A board export carries far more than we need; only the board name,
//! its lists and its cards are deserialized, everything else is ignored.

use crate::types::IncomingCard;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

/// A board: its name doubles as the trick category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// A column on a board. Open lists named with digits are difficulty ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub closed: bool,
}

impl List {
    /// Whether cards on this list carry a difficulty rating.
    ///
    /// The name must be digits that fit a stored difficulty; anything the
    /// difficulty parser would reject is not a rating list.
    pub fn is_rating_source(&self) -> bool {
        !self.closed
            && !self.name.is_empty()
            && self.name.chars().all(|c| c.is_ascii_digit())
            && self.name.parse::<i64>().is_ok()
    }
}

/// A card: one trick, possibly with a stance prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(rename = "idList")]
    pub id_list: String,
    #[serde(default)]
    pub closed: bool,
}

/// Cards that qualify for reconciliation, plus what was left out.
#[derive(Debug, Clone, Default)]
pub struct BoardCards {
    pub cards: Vec<IncomingCard>,
    pub skipped_list: usize,
    pub skipped_card: usize,
}

impl Board {
    /// Parse a board from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a board export (plain JSON or gzip).
    pub fn from_file(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 2];
        let read = reader.read(&mut magic)?;

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let parsed: serde_json::Result<Board> = if read == 2 && magic == [0x1f, 0x8b] {
            let decoder = flate2::read::GzDecoder::new(reader);
            serde_json::from_reader(decoder)
        } else {
            serde_json::from_reader(reader)
        };

        parsed.with_context(|| format!("Failed to parse board {}", path.display()))
    }

    /// Walk cards in board order and keep those on rating lists.
    ///
    /// The card's `list_identifier` is the name of its list.
    pub fn incoming_cards(&self) -> BoardCards {
        let lists: HashMap<&str, &List> = self.lists.iter().map(|l| (l.id.as_str(), l)).collect();
        let mut out = BoardCards::default();

        for card in &self.cards {
            let Some(list) = lists.get(card.id_list.as_str()) else {
                warn!(card = %card.name, list_id = %card.id_list, "Card references unknown list");
                out.skipped_card += 1;
                continue;
            };
            if !list.is_rating_source() {
                out.skipped_list += 1;
                continue;
            }
            if card.closed {
                out.skipped_card += 1;
                continue;
            }
            out.cards.push(IncomingCard::new(card.name.clone(), list.name.clone()));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_json() -> &'static str {
        r#"{
            "id": "617a6b11e6d60f7b4d9b2b04",
            "name": "Flat Ground",
            "desc": "",
            "lists": [
                {"id": "l1", "name": "1", "closed": false, "pos": 1},
                {"id": "l3", "name": "3", "closed": false},
                {"id": "old", "name": "2", "closed": true},
                {"id": "arc", "name": "Archive", "closed": false}
            ],
            "cards": [
                {"name": "Ollie", "idList": "l1", "labels": []},
                {"name": "Fakie Ollie", "idList": "l3"},
                {"name": "Shuvit", "idList": "old"},
                {"name": "Impossible", "idList": "arc"},
                {"name": "Casper", "idList": "l3", "closed": true},
                {"name": "Ghost", "idList": "gone"}
            ]
        }"#
    }

    #[test]
    fn test_is_rating_source() {
        let list = |name: &str, closed| List {
            id: "x".into(),
            name: name.into(),
            closed,
        };
        assert!(list("7", false).is_rating_source());
        assert!(list("10", false).is_rating_source());
        assert!(!list("7", true).is_rating_source());
        assert!(!list("Archive", false).is_rating_source());
        assert!(!list("", false).is_rating_source());
        assert!(!list("1a", false).is_rating_source());
        assert!(!list("99999999999999999999", false).is_rating_source());
    }

    #[test]
    fn test_incoming_cards_filters_lists_and_cards() {
        let board = Board::from_json(board_json()).unwrap();
        assert_eq!(board.name, "Flat Ground");

        let cards = board.incoming_cards();
        assert_eq!(
            cards.cards,
            vec![
                IncomingCard::new("Ollie", "1"),
                IncomingCard::new("Fakie Ollie", "3"),
            ]
        );
        assert_eq!(cards.skipped_list, 2);
        assert_eq!(cards.skipped_card, 2);
    }

    #[test]
    fn test_from_file_plain_and_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();

        let plain = dir.path().join("board.json");
        std::fs::write(&plain, board_json()).unwrap();
        assert_eq!(Board::from_file(&plain).unwrap().lists.len(), 4);

        let gz = dir.path().join("board.json.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(board_json().as_bytes()).unwrap();
        encoder.finish().unwrap();
        assert_eq!(Board::from_file(&gz).unwrap().cards.len(), 6);
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Board::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
