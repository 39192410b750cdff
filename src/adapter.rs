//! Adapter trait
//!
//! A datasource adapter implements a single operation: read one page of
//! objects of the requested entity. The framework validates the request
//! before the adapter sees it and re-encodes the adapter's objects after.

use crate::framework::{Request, Response};
use async_trait::async_trait;

// ============================================================================
// Adapter Trait
// ============================================================================

/// Core trait that all datasource adapters implement
///
/// `Config` is the adapter's own configuration shape, parsed from the JSON
/// payload carried by the datasource config of each request.
///
/// Failures are reported through [`Response::error`], never by panicking.
/// The framework calls `get_page` exactly once per accepted request and
/// never retries it.
#[async_trait]
pub trait Adapter<Config>: Send + Sync
where
    Config: Send + Sync,
{
    /// Read the page of objects described by the request
    async fn get_page(&self, request: &Request<Config>) -> Response;
}

#[async_trait]
impl<Config, A> Adapter<Config> for std::sync::Arc<A>
where
    Config: Send + Sync,
    A: Adapter<Config> + ?Sized,
{
    async fn get_page(&self, request: &Request<Config>) -> Response {
        (**self).get_page(request).await
    }
}
