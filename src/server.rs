//! Adapter server
//!
//! The per-call pipeline every transport runs: check the caller's token,
//! validate and translate the request, call the adapter once, and re-encode
//! its response.

use crate::adapter::Adapter;
use crate::auth::TokenStore;
use crate::config::FrameworkConfig;
use crate::error::Result;
use crate::request::validate_get_page_request;
use crate::response::build_get_page_response;
use crate::wire::{GetPageRequest, GetPageResponse};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Serves `GetPage` calls for one adapter
pub struct AdapterServer<A, Config> {
    adapter: Arc<A>,
    token_store: Option<Arc<TokenStore>>,
    token_watcher: Option<Arc<TokenWatcher>>,
    _config: PhantomData<fn() -> Config>,
}

/// Token file watch task, aborted when the last server clone is dropped
struct TokenWatcher(JoinHandle<()>);

impl Drop for TokenWatcher {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl<A, Config> AdapterServer<A, Config>
where
    A: Adapter<Config>,
    Config: DeserializeOwned + Send + Sync,
{
    /// Create a server that accepts every caller
    pub fn new(adapter: A) -> Self {
        Self::from_arc(Arc::new(adapter))
    }

    /// Create a server for a shared adapter
    pub fn from_arc(adapter: Arc<A>) -> Self {
        Self {
            adapter,
            token_store: None,
            token_watcher: None,
            _config: PhantomData,
        }
    }

    /// Create a server configured from the framework configuration
    ///
    /// With `auth_tokens_path` set, callers must present a token from that
    /// file. With a reload interval as well, the file is watched for changes
    /// for as long as the server (or a clone of it) is alive.
    pub async fn from_config(adapter: A, config: &FrameworkConfig) -> Result<Self> {
        let mut server = Self::new(adapter);
        let Some(path) = &config.auth_tokens_path else {
            return Ok(server);
        };

        let store = Arc::new(TokenStore::from_file(path)?);
        info!(path = %path.display(), count = store.len().await, "Loaded auth tokens");

        if let Some(interval) = config.token_reload_interval() {
            let handle = store.watch(interval)?;
            server.token_watcher = Some(Arc::new(TokenWatcher(handle)));
        }

        Ok(server.with_token_store(store))
    }

    /// Require callers to present a token from the store
    #[must_use]
    pub fn with_token_store(mut self, token_store: Arc<TokenStore>) -> Self {
        self.token_store = Some(token_store);
        self
    }

    /// The adapter being served
    pub fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    /// The token store callers are checked against, if any
    pub fn token_store(&self) -> Option<&Arc<TokenStore>> {
        self.token_store.as_ref()
    }

    /// Handle one `GetPage` call
    ///
    /// Returns `Err` only when the caller is not authenticated. Invalid
    /// requests and adapter failures are reported in the response.
    pub async fn get_page(
        &self,
        token: Option<&str>,
        request: &GetPageRequest,
    ) -> Result<GetPageResponse> {
        if let Some(store) = &self.token_store {
            store.authorize(token).await?;
        }

        let (adapter_request, mapping) = match validate_get_page_request::<Config>(request) {
            Ok(validated) => validated,
            Err(e) => {
                warn!(code = ?e.code(), error = %e, "Rejected page request");
                return Ok(GetPageResponse::Error(e.to_wire()));
            }
        };

        let response = self.adapter.get_page(&adapter_request).await;
        let response = build_get_page_response(&mapping, response);

        match &response {
            GetPageResponse::Success(page) => debug!(
                entity_id = %mapping.id,
                objects = page.objects.len(),
                has_next_page = !page.next_cursor.is_empty(),
                "Served page"
            ),
            GetPageResponse::Error(error) => warn!(
                entity_id = %mapping.id,
                code = ?error.code,
                message = %error.message,
                "Page request failed"
            ),
        }

        Ok(response)
    }
}

impl<A, Config> Clone for AdapterServer<A, Config> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            token_store: self.token_store.clone(),
            token_watcher: self.token_watcher.clone(),
            _config: PhantomData,
        }
    }
}
