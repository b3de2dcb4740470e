//! Rental lifecycle use cases.
//!
//! The guards here (duplicate live rental, availability, rental ceiling)
//! give callers precise error kinds; the repository re-validates the same
//! guards inside its transaction, so a race between the check and the write
//! still cannot break an invariant. The duplicate check runs first: a
//! client's own active rental already makes the movie unavailable, so the
//! owner must see `Conflict` while everyone else sees the availability
//! violation.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{
    Client, NewRental, Rental, RentalDetails, RentalStatus, MAX_ACTIVE_RENTALS,
};
use crate::domain::repositories::{ClientRepository, MovieRepository, RentalRepository};
use crate::error::AppError;

/// Admin rental-history query: free-text search plus sorting.
#[derive(Debug, Clone, Default)]
pub struct RentalHistoryQuery {
    pub search: Option<String>,
    pub status: Option<RentalStatus>,
    pub sort_by: RentalSortField,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentalSortField {
    #[default]
    RentalDate,
    ClientName,
    MovieTitle,
}

impl RentalSortField {
    pub fn parse(s: &str) -> Option<RentalSortField> {
        match s {
            "rentalDate" => Some(RentalSortField::RentalDate),
            "clientName" => Some(RentalSortField::ClientName),
            "movieTitle" => Some(RentalSortField::MovieTitle),
            _ => None,
        }
    }
}

/// Use cases of the rental lifecycle.
pub struct RentalService {
    rentals: Arc<dyn RentalRepository>,
    movies: Arc<dyn MovieRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl RentalService {
    pub fn new(
        rentals: Arc<dyn RentalRepository>,
        movies: Arc<dyn MovieRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            rentals,
            movies,
            clients,
        }
    }

    /// Rents a movie for a client with the fixed 2-day window.
    pub async fn rent(&self, client_id: i64, movie_id: i64) -> Result<Rental, AppError> {
        let movie = self
            .movies
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Movie not found", json!({ "id": movie_id }))
            })?;

        if self
            .rentals
            .find_active(client_id, movie_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Movie is already rented by this client",
                json!({ "clientId": client_id, "movieId": movie_id }),
            ));
        }

        if !movie.is_available {
            return Err(AppError::invariant_violation(
                "Movie is not available for rental",
                json!({ "movieId": movie_id }),
            ));
        }

        let active = self.rentals.count_active_for_client(client_id).await?;
        if active >= MAX_ACTIVE_RENTALS {
            return Err(AppError::invariant_violation(
                format!("Maximum number of active rentals ({MAX_ACTIVE_RENTALS}) reached"),
                json!({ "clientId": client_id, "activeRentals": active }),
            ));
        }

        let rental = self
            .rentals
            .rent(NewRental::begin_now(client_id, movie_id, movie.title))
            .await?;
        info!(rental_id = rental.id, client_id, movie_id, "rented movie");
        Ok(rental)
    }

    /// Rents a movie on behalf of a client named by a free-form identifier
    /// (admin operation): numeric id first, then email, then a
    /// case-insensitive `"First Last"` name.
    pub async fn rent_for_identifier(
        &self,
        identifier: &str,
        movie_id: i64,
    ) -> Result<(Rental, Client), AppError> {
        let client = self
            .resolve_client(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Client not found",
                    json!({ "identifier": identifier }),
                )
            })?;

        let rental = self.rent(client.id, movie_id).await?;
        Ok((rental, client))
    }

    async fn resolve_client(&self, identifier: &str) -> Result<Option<Client>, AppError> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<i64>() {
            if let Some(client) = self.clients.find_by_id(id).await? {
                return Ok(Some(client));
            }
        }

        if let Some(client) = self.clients.find_by_email(identifier).await? {
            return Ok(Some(client));
        }

        if let Some((first, last)) = identifier.split_once(' ') {
            return self.clients.find_by_name(first.trim(), last.trim()).await;
        }

        Ok(None)
    }

    /// Marks the client's active rental of a movie as awaiting approval.
    pub async fn request_return(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Rental, AppError> {
        let rental = self
            .rentals
            .request_return(client_id, movie_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No active rental found for this movie",
                    json!({ "movieId": movie_id }),
                )
            })?;
        info!(rental_id = rental.id, "return requested");
        Ok(rental)
    }

    /// Completes a pending return (admin operation).
    pub async fn approve_return(&self, rental_id: i64) -> Result<Rental, AppError> {
        let rental = self
            .rentals
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Rental not found", json!({ "id": rental_id }))
            })?;

        if rental.status != RentalStatus::PendingReturn {
            return Err(AppError::bad_request(
                "Rental is not pending return",
                json!({ "id": rental_id, "status": rental.status.as_str() }),
            ));
        }

        // A concurrent approval can win between the read and the update.
        let rental = self
            .rentals
            .approve_return(rental_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(
                    "Rental is not pending return",
                    json!({ "id": rental_id }),
                )
            })?;
        info!(rental_id, "return approved");
        Ok(rental)
    }

    /// Deletes one of the caller's own rental records. Only `returned`
    /// rentals can be removed; live rentals hold availability state.
    pub async fn delete_own(&self, client_id: i64, rental_id: i64) -> Result<(), AppError> {
        let rental = self
            .rentals
            .find_for_client(rental_id, client_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Rental not found", json!({ "id": rental_id }))
            })?;

        if rental.status != RentalStatus::Returned {
            return Err(AppError::invariant_violation(
                "Only returned rentals can be deleted",
                json!({ "id": rental_id, "status": rental.status.as_str() }),
            ));
        }

        self.rentals.delete(rental_id).await?;
        info!(rental_id, "deleted rental record");
        Ok(())
    }

    /// The caller's own rental history, newest first.
    pub async fn list_own(&self, client_id: i64) -> Result<Vec<Rental>, AppError> {
        self.rentals.list_for_client(client_id).await
    }

    /// Returns awaiting approval, most recently requested first.
    pub async fn pending_returns(&self) -> Result<Vec<RentalDetails>, AppError> {
        let mut pending = self
            .rentals
            .list_details(Some(RentalStatus::PendingReturn))
            .await?;
        pending.sort_by(|a, b| {
            b.rental
                .return_request_date
                .cmp(&a.rental.return_request_date)
        });
        Ok(pending)
    }

    /// Full rental history with search and sorting (admin operation).
    pub async fn history(
        &self,
        query: RentalHistoryQuery,
    ) -> Result<Vec<RentalDetails>, AppError> {
        let mut rentals = self.rentals.list_details(query.status).await?;

        if let Some(search) = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = search.to_lowercase();
            rentals.retain(|details| {
                let client_name = details.client_name().unwrap_or_default().to_lowercase();
                let email = details
                    .client_email
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase();
                let title = details.rental.movie_title.to_lowercase();
                client_name.contains(&needle)
                    || email.contains(&needle)
                    || title.contains(&needle)
            });
        }

        match query.sort_by {
            RentalSortField::RentalDate => {
                rentals.sort_by(|a, b| a.rental.rental_date.cmp(&b.rental.rental_date));
            }
            RentalSortField::ClientName => {
                rentals.sort_by(|a, b| {
                    a.client_name()
                        .unwrap_or_default()
                        .to_lowercase()
                        .cmp(&b.client_name().unwrap_or_default().to_lowercase())
                });
            }
            RentalSortField::MovieTitle => {
                rentals.sort_by(|a, b| {
                    a.rental
                        .movie_title
                        .to_lowercase()
                        .cmp(&b.rental.movie_title.to_lowercase())
                });
            }
        }
        if query.descending {
            rentals.reverse();
        }
        Ok(rentals)
    }
}
