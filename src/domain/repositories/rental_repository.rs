//! Repository trait for rental records and their state transitions.

use crate::domain::entities::{NewRental, Rental, RentalDetails, RentalStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for rentals.
///
/// The rent and approve transitions touch three records (rental, movie
/// availability, client counter). Implementations must apply each transition
/// atomically and re-validate the availability and rental-ceiling guards
/// with conditional updates, so two concurrent requests cannot both claim
/// the same movie or push a client past the cap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Creates a rental in `active` status, flips the movie unavailable and
    /// increments the client's active-rental counter, atomically.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvariantViolation`] if the movie is no longer
    ///   available or the client is already at [`MAX_ACTIVE_RENTALS`]
    /// - [`AppError::Conflict`] if a live rental for (client, movie) exists
    ///
    /// [`MAX_ACTIVE_RENTALS`]: crate::domain::entities::MAX_ACTIVE_RENTALS
    async fn rent(&self, new_rental: NewRental) -> Result<Rental, AppError>;

    /// Moves the client's `active` rental for the movie to `pending_return`
    /// and stamps the request date. Returns `None` if no active rental
    /// exists for (client, movie).
    async fn request_return(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError>;

    /// Moves a `pending_return` rental to `returned`, stamps the actual
    /// return date, decrements the client counter (floored at zero) and
    /// restores movie availability, atomically.
    ///
    /// Returns `None` if the rental is no longer `pending_return`; the
    /// caller distinguishes that from a missing rental.
    async fn approve_return(&self, rental_id: i64) -> Result<Option<Rental>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError>;

    /// Finds a rental only if it belongs to the given client.
    async fn find_for_client(
        &self,
        id: i64,
        client_id: i64,
    ) -> Result<Option<Rental>, AppError>;

    async fn find_active(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError>;

    async fn count_active_for_client(&self, client_id: i64) -> Result<i64, AppError>;

    /// Number of rentals in `active` status referencing the movie.
    async fn count_active_for_movie(&self, movie_id: i64) -> Result<i64, AppError>;

    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Rental>, AppError>;

    /// Lists rentals joined with client and movie data, optionally filtered
    /// by status. Missing references yield `None` fields, not errors.
    async fn list_details(
        &self,
        status: Option<RentalStatus>,
    ) -> Result<Vec<RentalDetails>, AppError>;

    /// Hard-deletes a rental record. Returns `false` if no rental matched.
    ///
    /// The returned-only guard is enforced by the caller, not here.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
