//! Handlers for the rental lifecycle endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::RentalHistoryParams;
use crate::api::dto::rentals::{
    AdminRentParams, AdminRentResponse, RentalDetailsResponse, RentalResponse,
};
use crate::api::middleware::remote_auth::require_admin;
use crate::domain::identity::AuthUser;
use crate::error::AppError;
use crate::state::CatalogState;
use crate::utils::parse_id;

/// Rents a movie for the caller with the fixed 2-day window.
///
/// # Endpoint
///
/// `POST /rent/{movieId}`
///
/// # Errors
///
/// - 404 if the movie does not exist
/// - 422 if the movie is unavailable or the caller is at the rental ceiling
/// - 409 if the caller already holds a live rental of this movie
pub async fn rent_movie_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RentalResponse>), AppError> {
    let movie_id = parse_id(&id, "movie")?;
    let rental = state.rental_service.rent(user.id, movie_id).await?;
    Ok((StatusCode::CREATED, Json(rental.into())))
}

/// Marks the caller's active rental of a movie as awaiting approval.
///
/// # Endpoint
///
/// `POST /return/{movieId}`
///
/// # Errors
///
/// Returns 404 if the caller has no active rental of this movie, including
/// when a return was already requested.
pub async fn return_movie_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<RentalResponse>, AppError> {
    let movie_id = parse_id(&id, "movie")?;
    let rental = state.rental_service.request_return(user.id, movie_id).await?;
    Ok(Json(rental.into()))
}

/// The caller's own rental history, newest first.
///
/// # Endpoint
///
/// `GET /rentals/me`
pub async fn my_rentals_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let rentals = state.rental_service.list_own(user.id).await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// Deletes one of the caller's own returned rental records.
///
/// # Endpoint
///
/// `DELETE /rentals/{id}`
///
/// # Errors
///
/// - 404 if the rental does not exist or belongs to someone else
/// - 422 if the rental is not in `returned` status
pub async fn delete_rental_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let rental_id = parse_id(&id, "rental")?;
    state.rental_service.delete_own(user.id, rental_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rents a movie on behalf of a client named by id, email or full name.
///
/// # Endpoint
///
/// `POST /admin/rent?client_identifier=...&movie_id=...` (admin)
pub async fn admin_rent_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<AdminRentParams>,
) -> Result<(StatusCode, Json<AdminRentResponse>), AppError> {
    require_admin(&user)?;
    params.validate()?;

    let (rental, client) = state
        .rental_service
        .rent_for_identifier(&params.client_identifier, params.movie_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AdminRentResponse {
            rental: rental.into(),
            client_name: client.full_name(),
            client_email: client.email,
        }),
    ))
}

/// Full rental history with search and sorting.
///
/// # Endpoint
///
/// `GET /admin/rentals` (admin)
///
/// # Query Parameters
///
/// - `search` - case-insensitive match on client name, email or movie title
/// - `status` - `active`, `pending_return` or `returned`
/// - `sort_by` - `rentalDate` (default), `clientName` or `movieTitle`
/// - `sort_order` - `asc` or `desc` (default)
pub async fn admin_rentals_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RentalHistoryParams>,
) -> Result<Json<Vec<RentalDetailsResponse>>, AppError> {
    require_admin(&user)?;
    let query = params
        .validate_into_query()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let rentals = state.rental_service.history(query).await?;
    Ok(Json(
        rentals
            .into_iter()
            .map(RentalDetailsResponse::from)
            .collect(),
    ))
}

/// Returns awaiting approval, most recently requested first.
///
/// # Endpoint
///
/// `GET /rentals/pending` (admin)
pub async fn pending_returns_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<RentalDetailsResponse>>, AppError> {
    require_admin(&user)?;
    let pending = state.rental_service.pending_returns().await?;
    Ok(Json(
        pending
            .into_iter()
            .map(RentalDetailsResponse::from)
            .collect(),
    ))
}

/// Completes a pending return.
///
/// # Endpoint
///
/// `POST /rentals/{id}/approve` (admin)
///
/// # Errors
///
/// - 404 if the rental does not exist
/// - 400 if the rental is not in `pending_return` status
pub async fn approve_return_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<RentalResponse>, AppError> {
    require_admin(&user)?;
    let rental_id = parse_id(&id, "rental")?;
    let rental = state.rental_service.approve_return(rental_id).await?;
    Ok(Json(rental.into()))
}
