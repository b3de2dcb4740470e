//! PostgreSQL implementation of the rental repository.
//!
//! The rent and approve transitions run inside a single transaction with
//! conditional updates, so concurrent requests for the same movie or client
//! serialize on the row updates instead of racing between read and write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    NewRental, Rental, RentalDetails, RentalStatus, MAX_ACTIVE_RENTALS,
};
use crate::domain::repositories::RentalRepository;
use crate::error::AppError;

const RENTAL_COLUMNS: &str = "id, client_id, movie_id, movie_title, rental_date, \
     planned_return_date, return_request_date, actual_return_date, status";

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i64,
    client_id: i64,
    movie_id: i64,
    movie_title: String,
    rental_date: DateTime<Utc>,
    planned_return_date: DateTime<Utc>,
    return_request_date: Option<DateTime<Utc>>,
    actual_return_date: Option<DateTime<Utc>>,
    status: String,
}

impl TryFrom<RentalRow> for Rental {
    type Error = AppError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let status = RentalStatus::parse(&row.status).ok_or_else(|| {
            AppError::internal("Corrupt rental record", json!({ "id": row.id }))
        })?;
        Ok(Rental {
            id: row.id,
            client_id: row.client_id,
            movie_id: row.movie_id,
            movie_title: row.movie_title,
            rental_date: row.rental_date,
            planned_return_date: row.planned_return_date,
            return_request_date: row.return_request_date,
            actual_return_date: row.actual_return_date,
            status,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RentalDetailsRow {
    id: i64,
    client_id: i64,
    movie_id: i64,
    movie_title: String,
    rental_date: DateTime<Utc>,
    planned_return_date: DateTime<Utc>,
    return_request_date: Option<DateTime<Utc>>,
    actual_return_date: Option<DateTime<Utc>>,
    status: String,
    client_first_name: Option<String>,
    client_last_name: Option<String>,
    client_email: Option<String>,
    client_phone: Option<String>,
    joined_movie_title: Option<String>,
    movie_genres: Option<Vec<String>>,
}

impl TryFrom<RentalDetailsRow> for RentalDetails {
    type Error = AppError;

    fn try_from(row: RentalDetailsRow) -> Result<Self, Self::Error> {
        let status = RentalStatus::parse(&row.status).ok_or_else(|| {
            AppError::internal("Corrupt rental record", json!({ "id": row.id }))
        })?;
        Ok(RentalDetails {
            rental: Rental {
                id: row.id,
                client_id: row.client_id,
                movie_id: row.movie_id,
                movie_title: row.movie_title,
                rental_date: row.rental_date,
                planned_return_date: row.planned_return_date,
                return_request_date: row.return_request_date,
                actual_return_date: row.actual_return_date,
                status,
            },
            client_first_name: row.client_first_name,
            client_last_name: row.client_last_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            movie_title: row.joined_movie_title,
            movie_genres: row.movie_genres,
        })
    }
}

/// PostgreSQL repository for rentals.
pub struct PgRentalRepository {
    pool: Arc<PgPool>,
}

impl PgRentalRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn rent(&self, new_rental: NewRental) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await?;

        // Same predicate as the rentals_live_unique index. The owner of a
        // live rental gets a conflict here, before the availability update
        // would report the movie as taken.
        let duplicate: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM rentals
             WHERE client_id = $1 AND movie_id = $2
               AND status IN ('active', 'pending_return')",
        )
        .bind(new_rental.client_id)
        .bind(new_rental.movie_id)
        .fetch_optional(&mut *tx)
        .await?;
        if duplicate.is_some() {
            return Err(AppError::conflict(
                "Movie is already rented by this client",
                json!({
                    "clientId": new_rental.client_id,
                    "movieId": new_rental.movie_id,
                }),
            ));
        }

        let claimed = sqlx::query(
            "UPDATE movies SET is_available = FALSE WHERE id = $1 AND is_available = TRUE",
        )
        .bind(new_rental.movie_id)
        .execute(&mut *tx)
        .await?;
        if claimed.rows_affected() == 0 {
            return Err(AppError::invariant_violation(
                "Movie is not available for rental",
                json!({ "movieId": new_rental.movie_id }),
            ));
        }

        let counted = sqlx::query(
            "UPDATE clients SET active_rentals_count = active_rentals_count + 1
             WHERE id = $1 AND active_rentals_count < $2",
        )
        .bind(new_rental.client_id)
        .bind(MAX_ACTIVE_RENTALS)
        .execute(&mut *tx)
        .await?;
        if counted.rows_affected() == 0 {
            return Err(AppError::invariant_violation(
                format!("Maximum number of active rentals ({MAX_ACTIVE_RENTALS}) reached"),
                json!({ "clientId": new_rental.client_id }),
            ));
        }

        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "INSERT INTO rentals (client_id, movie_id, movie_title, rental_date,
                                  planned_return_date, status)
             VALUES ($1, $2, $3, $4, $5, 'active')
             RETURNING {RENTAL_COLUMNS}"
        ))
        .bind(new_rental.client_id)
        .bind(new_rental.movie_id)
        .bind(&new_rental.movie_title)
        .bind(new_rental.rental_date)
        .bind(new_rental.planned_return_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => AppError::conflict(
                "Movie is already rented by this client",
                json!({
                    "clientId": new_rental.client_id,
                    "movieId": new_rental.movie_id,
                }),
            ),
            _ => e.into(),
        })?;

        tx.commit().await?;
        row.try_into()
    }

    async fn request_return(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "UPDATE rentals SET status = 'pending_return', return_request_date = NOW()
             WHERE client_id = $1 AND movie_id = $2 AND status = 'active'
             RETURNING {RENTAL_COLUMNS}"
        ))
        .bind(client_id)
        .bind(movie_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Rental::try_from).transpose()
    }

    async fn approve_return(&self, rental_id: i64) -> Result<Option<Rental>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "UPDATE rentals SET status = 'returned', actual_return_date = NOW()
             WHERE id = $1 AND status = 'pending_return'
             RETURNING {RENTAL_COLUMNS}"
        ))
        .bind(rental_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE clients SET active_rentals_count = GREATEST(active_rentals_count - 1, 0)
             WHERE id = $1",
        )
        .bind(row.client_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE movies SET is_available = TRUE WHERE id = $1")
            .bind(row.movie_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        row.try_into().map(Some)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Rental::try_from).transpose()
    }

    async fn find_for_client(
        &self,
        id: i64,
        client_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1 AND client_id = $2"
        ))
        .bind(id)
        .bind(client_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Rental::try_from).transpose()
    }

    async fn find_active(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals
             WHERE client_id = $1 AND movie_id = $2 AND status = 'active'"
        ))
        .bind(client_id)
        .bind(movie_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Rental::try_from).transpose()
    }

    async fn count_active_for_client(&self, client_id: i64) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM rentals WHERE client_id = $1 AND status = 'active'",
        )
        .bind(client_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count.0)
    }

    async fn count_active_for_movie(&self, movie_id: i64) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM rentals WHERE movie_id = $1 AND status = 'active'",
        )
        .bind(movie_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count.0)
    }

    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Rental>, AppError> {
        let rows = sqlx::query_as::<_, RentalRow>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals
             WHERE client_id = $1
             ORDER BY rental_date DESC"
        ))
        .bind(client_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn list_details(
        &self,
        status: Option<RentalStatus>,
    ) -> Result<Vec<RentalDetails>, AppError> {
        let rows = sqlx::query_as::<_, RentalDetailsRow>(
            "SELECT r.id, r.client_id, r.movie_id, r.movie_title, r.rental_date,
                    r.planned_return_date, r.return_request_date, r.actual_return_date,
                    r.status,
                    c.first_name AS client_first_name,
                    c.last_name AS client_last_name,
                    c.email AS client_email,
                    c.phone AS client_phone,
                    m.title AS joined_movie_title,
                    m.genres AS movie_genres
             FROM rentals r
             LEFT JOIN clients c ON c.id = r.client_id
             LEFT JOIN movies m ON m.id = r.movie_id
             WHERE ($1::text IS NULL OR r.status = $1)
             ORDER BY r.rental_date DESC",
        )
        .bind(status.map(|s| s.as_str().to_string()))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(RentalDetails::try_from).collect()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
