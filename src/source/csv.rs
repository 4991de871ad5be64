//! Trick CSV reader.
//!
//! The header row names the columns. Matching is case-insensitive and
//! column order in the file does not matter; `Name` and `Category` are
//! required, every other column is optional.

use crate::error::SyncError;
use crate::types::{parse_difficulty, StanceColumn, TrickRecord};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One parsed CSV row together with its line number for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTrickRow {
    pub line: u64,
    pub record: TrickRecord,
}

/// Read and parse a trick CSV file.
pub fn read_tricks_csv(path: &Path, null_sentinels: &[String]) -> Result<Vec<CsvTrickRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open CSV {}", path.display()))?;
    parse_tricks_csv(file, null_sentinels)
        .with_context(|| format!("Failed to parse CSV {}", path.display()))
}

/// Parse trick rows from any reader.
pub fn parse_tricks_csv<R: Read>(reader: R, null_sentinels: &[String]) -> Result<Vec<CsvTrickRow>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::Headers)
        .from_reader(reader);

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.to_ascii_lowercase(), idx))
        .collect();

    let name_idx = *headers
        .get("name")
        .ok_or_else(|| SyncError::malformed_row(1, "missing 'Name' column"))?;
    let category_idx = *headers
        .get("category")
        .ok_or_else(|| SyncError::malformed_row(1, "missing 'Category' column"))?;
    let special_idx = headers.get("isspecialtrick").copied();
    let difficulty_idx: Vec<(StanceColumn, usize)> = StanceColumn::ALL
        .iter()
        .filter_map(|&column| {
            headers
                .get(&column.column_name().to_ascii_lowercase())
                .map(|&idx| (column, idx))
        })
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let name = record.get(name_idx).unwrap_or("").trim();
        let category = record.get(category_idx).unwrap_or("").trim();
        if name.is_empty() {
            return Err(SyncError::malformed_row(line, "empty Name").into());
        }
        if category.is_empty() {
            return Err(SyncError::malformed_row(line, "empty Category").into());
        }

        let mut trick = TrickRecord::new(name, category);
        for &(column, idx) in &difficulty_idx {
            let raw = record.get(idx).unwrap_or("");
            let value = parse_difficulty(raw, null_sentinels).map_err(|raw| {
                SyncError::malformed_row(
                    line,
                    SyncError::invalid_difficulty(column.column_name(), &raw),
                )
            })?;
            trick.set(column, value);
        }
        if let Some(idx) = special_idx {
            let raw = record.get(idx).unwrap_or("");
            trick.is_special_trick = parse_flag(raw, null_sentinels)
                .ok_or_else(|| {
                    SyncError::malformed_row(line, format!("'{}' is not a flag (IsSpecialTrick)", raw))
                })?;
        }

        rows.push(CsvTrickRow {
            line,
            record: trick,
        });
    }

    Ok(rows)
}

/// Parse a boolean cell. Empty cells and sentinels are `false`.
fn parse_flag(raw: &str, null_sentinels: &[String]) -> Option<bool> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || null_sentinels.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
        return Some(false);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
