//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring and the Axum
//! server lifecycle for both components.

use crate::application::services::{IdentityService, MovieService, RentalService};
use crate::config::Config;
use crate::infrastructure::cache::{ListingCache, MemoryCache, NullCache};
use crate::infrastructure::identity::HttpIdentityResolver;
use crate::infrastructure::persistence::{
    PgClientRepository, PgMovieRepository, PgRentalRepository,
};
use crate::routes::{catalog_router, identity_router};
use crate::state::{CatalogState, IdentityState};
use crate::utils::{PasswordHasher, TokenCodec};

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the identity component.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Password hasher and token codec
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, bind or serve fails.
pub async fn run_identity(config: Config) -> Result<()> {
    let pool = connect_and_migrate(&config).await?;

    let clients = Arc::new(PgClientRepository::new(Arc::new(pool)));
    let hasher = PasswordHasher::new(config.password_scheme, config.bcrypt_cost);
    let tokens = TokenCodec::new(&config.jwt_secret, config.jwt_expire_minutes);

    let state = IdentityState {
        identity_service: Arc::new(IdentityService::new(clients, hasher, tokens)),
    };

    serve(identity_router(state), &config.listen_addr).await
}

/// Runs the catalog component.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Listing cache (in-memory TTL, or disabled)
/// - HTTP identity resolver pointed at the identity component
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if `AUTH_SERVICE_URL` is missing, or the database
/// connection, bind or serve fails.
pub async fn run_catalog(config: Config) -> Result<()> {
    let pool = Arc::new(connect_and_migrate(&config).await?);

    let movies = Arc::new(PgMovieRepository::new(pool.clone()));
    let rentals = Arc::new(PgRentalRepository::new(pool.clone()));
    let clients = Arc::new(PgClientRepository::new(pool));

    let cache: Arc<dyn ListingCache> = if config.is_cache_enabled() {
        tracing::info!("Listing cache enabled ({}s TTL)", config.cache_ttl_seconds);
        Arc::new(MemoryCache::new(Duration::from_secs(config.cache_ttl_seconds)))
    } else {
        tracing::info!("Listing cache disabled");
        Arc::new(NullCache::new())
    };

    let auth_url = config
        .auth_service_url
        .clone()
        .context("AUTH_SERVICE_URL must be set for the catalog component")?;
    let resolver = HttpIdentityResolver::new(
        auth_url,
        Duration::from_secs(config.auth_timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let state = CatalogState {
        movie_service: Arc::new(MovieService::new(
            movies.clone(),
            rentals.clone(),
            cache,
        )),
        rental_service: Arc::new(RentalService::new(rentals, movies, clients)),
        identity_resolver: Arc::new(resolver),
    };

    serve(catalog_router(state), &config.listen_addr).await
}

async fn connect_and_migrate(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

async fn serve(
    app: tower_http::normalize_path::NormalizePath<axum::Router>,
    listen_addr: &str,
) -> Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
