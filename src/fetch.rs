//! Trello board downloads.
//!
//! Boards are fetched one after another and written verbatim; no retries.

use crate::config::{BoardConfig, TrelloConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Error type for board downloads.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Trello key and token are required (set TRELLO_KEY and TRELLO_TOKEN)")]
    MissingCredentials,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {0}: {1}")]
    Http(u16, String),
    #[error("Category '{0}' cannot be used as a file name")]
    InvalidCategory(String),
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trello REST client (board endpoint only).
#[derive(Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    api_base: String,
    key: String,
    token: String,
}

impl TrelloClient {
    /// Build a client from config. Fails without credentials.
    pub fn new(config: &TrelloConfig) -> Result<Self, FetchError> {
        let (Some(key), Some(token)) = (config.key.clone(), config.token.clone()) else {
            return Err(FetchError::MissingCredentials);
        };

        let http = reqwest::Client::builder()
            .user_agent(format!("trick-sync/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            key,
            token,
        })
    }

    /// Board endpoint URL, without credentials.
    pub fn board_url(&self, board_id: &str) -> String {
        format!("{}/1/boards/{}", self.api_base, board_id)
    }

    /// Query parameters requesting the board with all lists and cards.
    fn board_query(&self) -> [(&'static str, &str); 7] {
        [
            ("key", self.key.as_str()),
            ("token", self.token.as_str()),
            ("fields", "all"),
            ("lists", "all"),
            ("list_fields", "all"),
            ("cards", "all"),
            ("card_fields", "all"),
        ]
    }

    /// Download one board's JSON.
    pub async fn fetch_board(&self, board_id: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(self.board_url(board_id))
            .query(&self.board_query())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16(), body));
        }
        Ok(body)
    }

    /// Download every board into `{out_dir}/{category}.json`.
    pub async fn fetch_all(
        &self,
        boards: &[BoardConfig],
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, FetchError> {
        let file_names = boards
            .iter()
            .map(|board| board_file_name(&board.category))
            .collect::<Result<Vec<_>, _>>()?;

        std::fs::create_dir_all(out_dir).map_err(|source| FetchError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(boards.len());
        for (board, file_name) in boards.iter().zip(file_names) {
            let body = self.fetch_board(&board.id).await?;
            let path = out_dir.join(file_name);
            std::fs::write(&path, body).map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?;
            info!(board = %board.id, category = %board.category, path = %path.display(), "Board downloaded");
            written.push(path);
        }

        Ok(written)
    }
}

/// `{category}.json`, refusing categories that would leave the output
/// directory.
fn board_file_name(category: &str) -> Result<String, FetchError> {
    let trimmed = category.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || category.contains(['/', '\\', '\0'])
    {
        return Err(FetchError::InvalidCategory(category.to_string()));
    }
    Ok(format!("{}.json", category))
}
