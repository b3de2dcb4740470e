//! Outbound identity resolution over HTTP.

mod http_identity_resolver;

pub use http_identity_resolver::HttpIdentityResolver;
