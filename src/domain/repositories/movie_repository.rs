//! Repository trait for movie catalog data access.

use crate::domain::entities::{Movie, MovieFilter, MoviePatch, NewMovie};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the movie catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError>;

    /// Lists movies matching the filter, newest first.
    async fn list(
        &self,
        filter: &MovieFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, AppError>;

    /// Counts movies matching the filter.
    async fn count(&self, filter: &MovieFilter) -> Result<i64, AppError>;

    /// Partially updates a movie. Only `Some` fields of the patch change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no movie matches `id`.
    async fn update(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError>;

    /// Hard-deletes a movie. Returns `false` if no movie matched.
    ///
    /// The active-rental guard is enforced by the caller, not here.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Distinct genre names across the whole catalog, sorted.
    async fn distinct_genres(&self) -> Result<Vec<String>, AppError>;

    /// Store connectivity probe for health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
