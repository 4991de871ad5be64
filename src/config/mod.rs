//! Layered configuration.
//!
//! Merges tiers field-by-field, later tiers winning:
//! 1. **Defaults** - Built into the binary
//! 2. **Project** - `$CWD/trick-sync/config.yaml`
//! 3. **User** - `~/.trick-sync/config.yaml`
//! 4. **Environment** - Variables below
//!
//! ## Environment Variables
//! - `TRICK_SYNC_CONFIG_PATH` - Explicit config file (replaces the file tiers)
//! - `TRICK_SYNC_DB_PATH` - Database path
//! - `TRICK_SYNC_JSON_DIR` - Board export directory
//! - `TRELLO_KEY` / `TRELLO_TOKEN` - Trello credentials
//! - `TRICK_SYNC_USER_DIR` - User config dir (default: `~/.trick-sync`)
//! - `TRICK_SYNC_PROJECT_DIR` - Project config dir (default: `./trick-sync`)

mod loader;
mod merge;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
