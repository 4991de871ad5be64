//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::deep_merge_all;
use super::types::Config;
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/trick-sync/)
    Project = 1,
    /// User-level config (~/.trick-sync/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Paths for each configuration tier.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // User dir: TRICK_SYNC_USER_DIR or ~/.trick-sync
        let user_dir = std::env::var("TRICK_SYNC_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".trick-sync")));

        // Project dir: TRICK_SYNC_PROJECT_DIR or $CWD/trick-sync
        let project_dir = std::env::var("TRICK_SYNC_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("trick-sync")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }

    fn config_file(dir: Option<&Path>) -> Option<PathBuf> {
        dir.map(|d| d.join("config.yaml")).filter(|f| f.exists())
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Highest-priority config file that contributed (if any)
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Explicit config file replaces the file tiers
        if let Ok(explicit_path) = std::env::var("TRICK_SYNC_CONFIG_PATH") {
            return Self::load_file(paths, PathBuf::from(explicit_path));
        }

        let mut configs: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut config_path = None;

        for (tier, file) in [
            (
                ConfigTier::Project,
                ConfigPaths::config_file(paths.project_dir.as_deref()),
            ),
            (
                ConfigTier::User,
                ConfigPaths::config_file(paths.user_dir.as_deref()),
            ),
        ] {
            let Some(file) = file else { continue };
            if let Some(value) = read_yaml_tier(&file, tier) {
                configs.push(value);
                config_path = Some(file);
            }
        }

        let merged = deep_merge_all(configs);
        let mut config: Config = serde_json::from_value(merged)?;
        Self::apply_env_overrides(&mut config);

        Ok(Self {
            paths,
            config,
            config_path,
        })
    }

    /// Load a single explicit config file on top of defaults.
    pub fn load_file(paths: ConfigPaths, path: PathBuf) -> Result<Self> {
        let mut config = Config::load(&path)?;
        Self::apply_env_overrides(&mut config);
        Ok(Self {
            paths,
            config,
            config_path: Some(path),
        })
    }

    /// Apply environment variable overrides to config.
    fn apply_env_overrides(config: &mut Config) {
        if let Ok(db_path) = std::env::var("TRICK_SYNC_DB_PATH") {
            config.database.path = PathBuf::from(db_path);
        }

        if let Ok(json_dir) = std::env::var("TRICK_SYNC_JSON_DIR") {
            config.trello.json_dir = PathBuf::from(json_dir);
        }

        if let Ok(key) = std::env::var("TRELLO_KEY") {
            config.trello.key = Some(key);
        }

        if let Ok(token) = std::env::var("TRELLO_TOKEN") {
            config.trello.token = Some(token);
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Get the config file path that was used.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

/// Read one tier's YAML. Unreadable or malformed files are skipped with a warning.
fn read_yaml_tier(file: &Path, tier: ConfigTier) -> Option<Value> {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warn!(%tier, path = %file.display(), error = %e, "Skipping unreadable config");
            return None;
        }
    };
    match serde_yaml::from_str::<Value>(&content) {
        Ok(value) => {
            debug!(%tier, path = %file.display(), "Loaded config tier");
            Some(value)
        }
        Err(e) => {
            warn!(%tier, path = %file.display(), error = %e, "Skipping malformed config");
            None
        }
    }
}
