//! Core types for the trick store and the reconciler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the `Tricks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickRecord {
    pub name: String,
    pub category: String,
    pub difficulty: Option<i64>,
    pub fakie_difficulty: Option<i64>,
    pub switch_difficulty: Option<i64>,
    pub nollie_difficulty: Option<i64>,
    pub is_special_trick: bool,
}

impl TrickRecord {
    /// A fresh, non-special record with every difficulty unset.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            difficulty: None,
            fakie_difficulty: None,
            switch_difficulty: None,
            nollie_difficulty: None,
            is_special_trick: false,
        }
    }

    /// Read the difficulty stored in the given column.
    pub fn get(&self, column: StanceColumn) -> Option<i64> {
        match column {
            StanceColumn::Base => self.difficulty,
            StanceColumn::Fakie => self.fakie_difficulty,
            StanceColumn::Switch => self.switch_difficulty,
            StanceColumn::Nollie => self.nollie_difficulty,
        }
    }

    /// Overwrite the difficulty stored in the given column.
    pub fn set(&mut self, column: StanceColumn, value: Option<i64>) {
        match column {
            StanceColumn::Base => self.difficulty = value,
            StanceColumn::Fakie => self.fakie_difficulty = value,
            StanceColumn::Switch => self.switch_difficulty = value,
            StanceColumn::Nollie => self.nollie_difficulty = value,
        }
    }
}

/// Selects one of the four difficulty columns of a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StanceColumn {
    Base,
    Fakie,
    Switch,
    Nollie,
}

impl StanceColumn {
    /// All columns in table order.
    pub const ALL: [StanceColumn; 4] = [
        StanceColumn::Base,
        StanceColumn::Fakie,
        StanceColumn::Switch,
        StanceColumn::Nollie,
    ];

    /// SQL column name. Only these four identifiers are ever interpolated
    /// into statements.
    pub fn column_name(self) -> &'static str {
        match self {
            StanceColumn::Base => "Difficulty",
            StanceColumn::Fakie => "FakieDifficulty",
            StanceColumn::Switch => "SwitchDifficulty",
            StanceColumn::Nollie => "NollieDifficulty",
        }
    }

    /// Display prefix re-applied when listing variants ("Fakie ", ...).
    pub fn display_prefix(self) -> &'static str {
        match self {
            StanceColumn::Base => "",
            StanceColumn::Fakie => "Fakie ",
            StanceColumn::Switch => "Switch ",
            StanceColumn::Nollie => "Nollie ",
        }
    }
}

impl fmt::Display for StanceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StanceColumn::Base => "base",
            StanceColumn::Fakie => "fakie",
            StanceColumn::Switch => "switch",
            StanceColumn::Nollie => "nollie",
        };
        f.write_str(s)
    }
}

/// One card pulled from a source board.
///
/// `list_identifier` is the rating implied by the list the card sits in,
/// i.e. the list's name for qualifying (numeric, open) lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingCard {
    pub name: String,
    pub list_identifier: String,
}

impl IncomingCard {
    pub fn new(name: impl Into<String>, list_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list_identifier: list_identifier.into(),
        }
    }
}

/// Whether a reconcile call inserted or updated a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteOutcome {
    Added,
    Updated,
}

/// Result of reconciling one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub outcome: WriteOutcome,
    pub name: String,
    pub category: String,
    pub column: StanceColumn,
}

/// Per-board counts reported after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub category: String,
    pub added: usize,
    pub updated: usize,
    /// Cards sitting in closed or non-numeric lists.
    pub skipped_list: usize,
    /// Archived cards and cards pointing at an unknown list.
    pub skipped_card: usize,
}

impl ImportSummary {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Added => self.added += 1,
            WriteOutcome::Updated => self.updated += 1,
        }
    }
}

/// Counts reported after a CSV full-table reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvReloadSummary {
    pub deleted: usize,
    pub inserted: usize,
    pub kept_special: usize,
}

/// Parse a difficulty cell or list name under the null-sentinel policy.
///
/// Digits parse to a value, empty strings and sentinels (case-insensitive)
/// map to `None`, anything else is `Err` with the offending text.
pub fn parse_difficulty(raw: &str, null_sentinels: &[String]) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if null_sentinels
        .iter()
        .any(|s| s.eq_ignore_ascii_case(trimmed))
    {
        return Ok(None);
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse::<i64>().map(Some).map_err(|_| raw.to_string());
    }
    Err(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinels() -> Vec<String> {
        vec!["INVALID".to_string(), "NULL".to_string()]
    }

    #[test]
    fn test_parse_difficulty_digits() {
        assert_eq!(parse_difficulty("3", &sentinels()), Ok(Some(3)));
        assert_eq!(parse_difficulty(" 10 ", &sentinels()), Ok(Some(10)));
    }

    #[test]
    fn test_parse_difficulty_sentinels() {
        assert_eq!(parse_difficulty("", &sentinels()), Ok(None));
        assert_eq!(parse_difficulty("INVALID", &sentinels()), Ok(None));
        assert_eq!(parse_difficulty("invalid", &sentinels()), Ok(None));
        assert_eq!(parse_difficulty("Null", &sentinels()), Ok(None));
    }

    #[test]
    fn test_parse_difficulty_rejects_text() {
        assert_eq!(
            parse_difficulty("Archive", &sentinels()),
            Err("Archive".to_string())
        );
        assert!(parse_difficulty("-1", &sentinels()).is_err());
        assert!(parse_difficulty("2.5", &sentinels()).is_err());
    }

    #[test]
    fn test_record_get_set() {
        let mut record = TrickRecord::new("Ollie", "Flat Ground");
        for column in StanceColumn::ALL {
            assert_eq!(record.get(column), None);
        }
        record.set(StanceColumn::Nollie, Some(7));
        assert_eq!(record.nollie_difficulty, Some(7));
        assert_eq!(record.get(StanceColumn::Nollie), Some(7));
        assert_eq!(record.get(StanceColumn::Base), None);
    }

    #[test]
    fn test_column_names_match_schema() {
        let names: Vec<&str> = StanceColumn::ALL.iter().map(|c| c.column_name()).collect();
        assert_eq!(
            names,
            vec![
                "Difficulty",
                "FakieDifficulty",
                "SwitchDifficulty",
                "NollieDifficulty"
            ]
        );
    }
}
