//! Listing cache trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::MoviePage;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache for movie listing pages.
///
/// Keys are the normalized filter+pagination tuple
/// ([`crate::domain::entities::MovieFilter::cache_key`]). Entries are never
/// invalidated by catalog mutations; staleness is bounded by the TTL and is
/// an accepted, documented property of the listing endpoint. Implementations
/// behind this trait can add explicit invalidation later without touching
/// callers.
///
/// Cache failures must degrade to store lookups, never break a request.
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Returns the cached page for a key if present and fresh.
    async fn get(&self, key: &str) -> CacheResult<Option<MoviePage>>;

    /// Stores a page under a key with the implementation's TTL.
    async fn put(&self, key: &str, page: MoviePage) -> CacheResult<()>;

    /// Whether the cache backend is operational.
    async fn health_check(&self) -> bool;
}
