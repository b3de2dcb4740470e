//! Adapters for external systems: PostgreSQL, the listing cache and the
//! identity component's HTTP API.

pub mod cache;
pub mod identity;
pub mod persistence;
