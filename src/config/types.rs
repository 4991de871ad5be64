//! Configuration types and structures.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub trello: TrelloConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub list: ListConfig,
}

impl Config {
    /// Load a single config file with no tier merging.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Ensure the database's parent directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.database.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

/// Trick database location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("Assets/StreamingAssets/Database.db")
}

/// A Trello board and the category its tricks belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub id: String,
    pub category: String,
}

impl BoardConfig {
    fn new(id: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
        }
    }
}

/// Trello API access and the boards to pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key. Usually supplied through `TRELLO_KEY`.
    #[serde(default)]
    pub key: Option<String>,

    /// API token. Usually supplied through `TRELLO_TOKEN`.
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory board exports are written to and imported from.
    #[serde(default = "default_json_dir")]
    pub json_dir: PathBuf,

    #[serde(default = "default_boards")]
    pub boards: Vec<BoardConfig>,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            key: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            json_dir: default_json_dir(),
            boards: default_boards(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.trello.com".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_json_dir() -> PathBuf {
    PathBuf::from("JSON")
}

fn default_boards() -> Vec<BoardConfig> {
    vec![
        BoardConfig::new("617a6921b86d2d0a97572097", "Manual Pad"),
        BoardConfig::new("617a694152bdc05afe70a9f0", "Ledge"),
        BoardConfig::new("618f1a0b8e7f8936beba677f", "Rail"),
        BoardConfig::new("61769f73378de8262158689a", "Vert"),
        BoardConfig::new("617a6b11e6d60f7b4d9b2b04", "Flat Ground"),
        BoardConfig::new("617a6b359c4ddb448d6dadc9", "Mini Ramp"),
    ]
}

/// Source parsing options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Cell values that mean "no difficulty" (compared case-insensitively).
    #[serde(default = "default_null_sentinels")]
    pub null_sentinels: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            null_sentinels: default_null_sentinels(),
        }
    }
}

fn default_null_sentinels() -> Vec<String> {
    vec!["INVALID".to_string(), "NULL".to_string()]
}

/// Trick list output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Highest difficulty printed.
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: i64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            max_difficulty: default_max_difficulty(),
        }
    }
}

fn default_max_difficulty() -> i64 {
    10
}
