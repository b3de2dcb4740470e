//! Use-case layer: orchestrates repositories, hashing, tokens and the cache.

pub mod services;
