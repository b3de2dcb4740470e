//! In-process TTL cache for listing pages.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::service::{CacheError, CacheResult, ListingCache};
use crate::domain::entities::MoviePage;

/// Mutex-guarded map from normalized listing key to a cached page.
///
/// Entries expire after `ttl`; expired entries are dropped lazily on read
/// and pruned on write. Mutations never invalidate entries.
pub struct MemoryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, MoviePage)>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ListingCache for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<MoviePage>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        match entries.get(key) {
            Some((stored_at, page)) if stored_at.elapsed() < self.ttl => {
                Ok(Some(page.clone()))
            }
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, page: MoviePage) -> CacheResult<()> {
        let ttl = self.ttl;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        entries.insert(key.to_string(), (Instant::now(), page));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
