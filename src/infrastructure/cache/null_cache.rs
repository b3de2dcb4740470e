//! No-op cache implementation for testing or disabled caching.

use async_trait::async_trait;
use tracing::debug;

use super::service::{CacheResult, ListingCache};
use crate::domain::entities::MoviePage;

/// A cache implementation that does nothing.
///
/// Every lookup misses, so listing requests always hit the store.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (listing cache disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingCache for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<MoviePage>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _page: MoviePage) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
