//! Short-lived read-through cache for movie listings.
//!
//! Provides a [`ListingCache`] trait with two implementations:
//! - [`MemoryCache`] - mutex-guarded in-process TTL map
//! - [`NullCache`] - no-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::{CacheError, CacheResult, ListingCache};
