//! Handlers for the movie catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::movies::{
    GenresResponse, MovieCreateRequest, MovieResponse, MovieUpdateRequest, MoviesListResponse,
};
use crate::api::dto::pagination::ListMoviesParams;
use crate::api::middleware::remote_auth::require_admin;
use crate::domain::identity::AuthUser;
use crate::error::AppError;
use crate::state::CatalogState;
use crate::utils::parse_id;

/// Lists a page of the catalog, newest first.
///
/// # Endpoint
///
/// `GET /movies`
///
/// # Query Parameters
///
/// - `page` (default 1), `per_page` (default 10, max 100)
/// - `available_only` (default true), `genre`, `year`, `search`
///
/// Pages are served from a short-lived cache and may lag mutations by up to
/// the cache TTL.
pub async fn list_movies_handler(
    State(state): State<CatalogState>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<MoviesListResponse>, AppError> {
    let (filter, page, per_page) = params
        .validate_and_split()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let result = state.movie_service.list(filter, page, per_page).await?;
    Ok(Json(result.into()))
}

/// Fetches a single movie.
///
/// # Endpoint
///
/// `GET /movies/{id}`
pub async fn get_movie_handler(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<MovieResponse>, AppError> {
    let id = parse_id(&id, "movie")?;
    let movie = state.movie_service.get(id).await?;
    Ok(Json(movie.into()))
}

/// Lists distinct genre names across the catalog.
///
/// # Endpoint
///
/// `GET /genres`
pub async fn genres_handler(
    State(state): State<CatalogState>,
) -> Result<Json<GenresResponse>, AppError> {
    let genres = state.movie_service.genres().await?;
    Ok(Json(GenresResponse { genres }))
}

/// Adds a movie to the catalog.
///
/// # Endpoint
///
/// `POST /movies` (admin)
pub async fn create_movie_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<MovieCreateRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    require_admin(&user)?;
    payload.validate()?;

    let movie = state.movie_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

/// Partially updates a movie.
///
/// # Endpoint
///
/// `PUT /movies/{id}` (admin)
pub async fn update_movie_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<MovieUpdateRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    require_admin(&user)?;
    payload.validate()?;
    let id = parse_id(&id, "movie")?;

    let movie = state.movie_service.update(id, payload.into()).await?;
    Ok(Json(movie.into()))
}

/// Deletes a movie.
///
/// # Endpoint
///
/// `DELETE /movies/{id}` (admin)
///
/// # Errors
///
/// Returns 422 while any rental of the movie is still active.
pub async fn delete_movie_handler(
    State(state): State<CatalogState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_admin(&user)?;
    let id = parse_id(&id, "movie")?;
    state.movie_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
