//! Structured error types for sync commands.

use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Source data errors
    InvalidDifficulty,
    MalformedRow,
    MissingCategory,

    // Store errors
    BackupMissing,
    TrickNotFound,
    UnknownCategory,
}

/// Structured error for domain failures.
#[derive(Debug)]
pub struct SyncError {
    pub code: ErrorCode,
    pub message: String,
    pub field: Option<String>,
}

impl SyncError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn invalid_difficulty(field: &str, raw: &str) -> Self {
        Self::new(
            ErrorCode::InvalidDifficulty,
            format!("'{}' is not a difficulty rating", raw),
        )
        .with_field(field)
    }

    pub fn malformed_row(line: u64, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::MalformedRow,
            format!("Row {}: {}", line, reason),
        )
    }

    pub fn missing_category(source: &str) -> Self {
        Self::new(
            ErrorCode::MissingCategory,
            format!("No category for {} (board has no name and none was given)", source),
        )
    }

    pub fn backup_missing() -> Self {
        Self::new(
            ErrorCode::BackupMissing,
            "No Tricks_Backup table to restore from",
        )
    }

    pub fn trick_not_found(name: &str, category: &str) -> Self {
        Self::new(
            ErrorCode::TrickNotFound,
            format!("Trick not found: {} ({})", name, category),
        )
    }

    pub fn unknown_category(category: &str, known: &[String]) -> Self {
        let known = if known.is_empty() {
            "the table is empty".to_string()
        } else {
            format!("known: {}", known.join(", "))
        };
        Self::new(
            ErrorCode::UnknownCategory,
            format!("No tricks in category '{}' ({})", category, known),
        )
        .with_field("category")
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(ref field) => write!(f, "{} ({})", self.message, field),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SyncError {}
