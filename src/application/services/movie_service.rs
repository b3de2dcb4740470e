//! Movie catalog use cases: listing with a short-lived cache, lookups and
//! admin mutations.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    total_pages, Movie, MovieFilter, MoviePage, MoviePatch, NewMovie,
};
use crate::domain::repositories::{MovieRepository, RentalRepository};
use crate::error::AppError;
use crate::infrastructure::cache::ListingCache;

/// Use cases of the movie catalog.
pub struct MovieService {
    movies: Arc<dyn MovieRepository>,
    rentals: Arc<dyn RentalRepository>,
    cache: Arc<dyn ListingCache>,
}

impl MovieService {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        rentals: Arc<dyn RentalRepository>,
        cache: Arc<dyn ListingCache>,
    ) -> Self {
        Self {
            movies,
            rentals,
            cache,
        }
    }

    /// Lists a page of the catalog, newest first.
    ///
    /// Results are cached under the normalized filter key; a cache failure
    /// degrades to a store lookup. Pages may be stale for up to the cache
    /// TTL after a mutation.
    pub async fn list(
        &self,
        filter: MovieFilter,
        page: i64,
        per_page: i64,
    ) -> Result<MoviePage, AppError> {
        if let Err(message) = filter.validate() {
            return Err(AppError::bad_request(message, json!({})));
        }

        let key = filter.cache_key(page, per_page);
        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                debug!(%key, "listing cache hit");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "listing cache read failed"),
        }

        let total = self.movies.count(&filter).await?;
        let movies = self
            .movies
            .list(&filter, per_page, (page - 1) * per_page)
            .await?;
        let result = MoviePage {
            movies,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        };

        if let Err(e) = self.cache.put(&key, result.clone()).await {
            warn!(error = %e, "listing cache write failed");
        }
        Ok(result)
    }

    pub async fn get(&self, id: i64) -> Result<Movie, AppError> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Movie not found", json!({ "id": id })))
    }

    /// Distinct genre names across the catalog, sorted.
    pub async fn genres(&self) -> Result<Vec<String>, AppError> {
        self.movies.distinct_genres().await
    }

    pub async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError> {
        let movie = self.movies.create(new_movie).await?;
        info!(movie_id = movie.id, "added movie to catalog");
        Ok(movie)
    }

    pub async fn update(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError> {
        self.movies.update(id, patch).await
    }

    /// Deletes a movie unless a rental currently holds it.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let active = self.rentals.count_active_for_movie(id).await?;
        if active > 0 {
            return Err(AppError::invariant_violation(
                "Cannot delete a movie with active rentals",
                json!({ "id": id, "activeRentals": active }),
            ));
        }
        if !self.movies.delete(id).await? {
            return Err(AppError::not_found("Movie not found", json!({ "id": id })));
        }
        info!(movie_id = id, "deleted movie");
        Ok(())
    }

    /// Store connectivity probe for the health endpoint.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.movies.ping().await
    }
}
