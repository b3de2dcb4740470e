//! Top-level router assembly for the two components.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, the services sit behind browser frontends
//! - **Authentication** - Bearer token, local for identity, resolved
//!   remotely for the catalog
//! - **Path normalization** - Trailing slash handling

use axum::{middleware, Router};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::middleware::{auth, remote_auth, tracing};
use crate::state::{CatalogState, IdentityState};

/// Identity component router without path normalization; used directly by
/// HTTP tests.
pub fn identity_app(state: IdentityState) -> Router {
    let protected = api::routes::identity_protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(api::routes::identity_public_routes())
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Catalog component router without path normalization; used directly by
/// HTTP tests.
pub fn catalog_app(state: CatalogState) -> Router {
    let protected = api::routes::catalog_protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), remote_auth::layer),
    );

    Router::new()
        .merge(api::routes::catalog_public_routes())
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Identity component router as served.
pub fn identity_router(state: IdentityState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(identity_app(state))
}

/// Catalog component router as served.
pub fn catalog_router(state: CatalogState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(catalog_app(state))
}
