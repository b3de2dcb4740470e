//! Middleware for authentication and request tracing.

pub mod auth;
pub mod remote_auth;
pub mod tracing;
