//! Handlers for the health check endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::{CatalogState, IdentityState};

/// Identity component health: database connectivity.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns 200 when healthy, 503 with the same body shape when degraded.
pub async fn identity_health_handler(
    State(state): State<IdentityState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match state.identity_service.ping_store().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    };

    respond(HealthChecks {
        database,
        identity: None,
    })
}

/// Catalog component health: database plus identity component reachability.
///
/// # Endpoint
///
/// `GET /health`
pub async fn catalog_health_handler(
    State(state): State<CatalogState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match state.movie_service.ping_store().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    };

    let identity = if state.identity_resolver.health_check().await {
        CheckStatus::ok("Identity service reachable")
    } else {
        CheckStatus::error("Identity service unreachable")
    };

    respond(HealthChecks {
        database,
        identity: Some(identity),
    })
}

fn respond(
    checks: HealthChecks,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let all_healthy =
        checks.database.is_ok() && checks.identity.as_ref().is_none_or(CheckStatus::is_ok);

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
