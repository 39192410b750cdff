//! File-backed token store

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Set of valid caller tokens
#[derive(Debug)]
pub struct TokenStore {
    /// Token file, empty for an in-memory store
    path: PathBuf,
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl TokenStore {
    /// Load a token store from a JSON file containing an array of tokens
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|e| Error::TokenStore {
            message: format!("Failed to read token file {}: {e}", path.display()),
        })?;
        let tokens = parse_tokens(&contents)?;

        Ok(Self {
            path,
            tokens: Arc::new(RwLock::new(tokens)),
        })
    }

    /// Create an in-memory token store
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: PathBuf::new(),
            tokens: Arc::new(RwLock::new(
                tokens
                    .into_iter()
                    .map(Into::into)
                    .filter(|t: &String| !t.is_empty())
                    .collect(),
            )),
        }
    }

    /// Path of the token file, `None` for an in-memory store
    pub fn path(&self) -> Option<&Path> {
        if self.path.as_os_str().is_empty() {
            None
        } else {
            Some(&self.path)
        }
    }

    /// Re-read the token file and replace the token set
    ///
    /// On failure the current set is kept. Returns the number of tokens.
    pub async fn reload(&self) -> Result<usize> {
        let Some(path) = self.path() else {
            return Ok(self.len().await);
        };

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::TokenStore {
                message: format!("Failed to read token file {}: {e}", path.display()),
            })?;
        let loaded = parse_tokens(&contents)?;
        let count = loaded.len();

        let mut tokens = self.tokens.write().await;
        *tokens = loaded;

        Ok(count)
    }

    /// Whether the token is in the set
    pub async fn is_valid(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }

    /// Check a caller's token
    pub async fn authorize(&self, token: Option<&str>) -> Result<()> {
        match token {
            None | Some("") => Err(Error::unauthenticated("Missing auth token.")),
            Some(token) if self.is_valid(token).await => Ok(()),
            Some(_) => Err(Error::unauthenticated("Invalid auth token.")),
        }
    }

    /// Number of tokens in the set
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the set is empty
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Poll the token file and reload it whenever it changes
    ///
    /// The file is re-read on the first tick, then only when its modification
    /// time or size changes. The task runs until the returned handle is
    /// aborted. A failed reload is logged and the previous tokens stay in
    /// effect.
    pub fn watch(self: &Arc<Self>, interval: Duration) -> Result<JoinHandle<()>> {
        let Some(path) = self.path().map(Path::to_path_buf) else {
            return Err(Error::token_store("An in-memory token store cannot be watched."));
        };

        let store = Arc::clone(self);

        Ok(tokio::spawn(async move {
            let mut last_seen = None;
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                let version = file_version(&path).await;
                if version.is_none() || version == last_seen {
                    continue;
                }
                last_seen = version;

                match store.reload().await {
                    Ok(count) => info!(path = %path.display(), count, "Reloaded auth tokens"),
                    Err(e) => warn!(path = %path.display(), error = %e, "Failed to reload auth tokens"),
                }
            }
        }))
    }
}

/// Modification time and size of the file, used to detect changes
async fn file_version(path: &Path) -> Option<(SystemTime, u64)> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.modified().ok().map(|m| (m, metadata.len())),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Token file not readable");
            None
        }
    }
}

fn parse_tokens(contents: &str) -> Result<HashSet<String>> {
    let tokens: Vec<String> = serde_json::from_str(contents).map_err(|e| Error::TokenStore {
        message: format!("Token file must hold a JSON array of strings: {e}"),
    })?;
    Ok(tokens.into_iter().filter(|t| !t.is_empty()).collect())
}
