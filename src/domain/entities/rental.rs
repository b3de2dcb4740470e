//! Rental record and its state machine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of concurrent `active` rentals per client.
pub const MAX_ACTIVE_RENTALS: i64 = 3;

/// Fixed rental window added to the rental date.
pub const RENTAL_PERIOD_DAYS: i64 = 2;

/// Rental lifecycle: `active → pending_return → returned`.
///
/// `returned` is terminal. There is no direct active→returned shortcut and
/// no reject path; once pending, the only forward transition is approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Active,
    PendingReturn,
    Returned,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::PendingReturn => "pending_return",
            RentalStatus::Returned => "returned",
        }
    }

    pub fn parse(s: &str) -> Option<RentalStatus> {
        match s {
            "active" => Some(RentalStatus::Active),
            "pending_return" => Some(RentalStatus::PendingReturn),
            "returned" => Some(RentalStatus::Returned),
            _ => None,
        }
    }
}

/// Links one client and one movie for a single rental occurrence.
///
/// `movie_title` is denormalized at rent time so historical listings survive
/// movie deletion.
#[derive(Debug, Clone)]
pub struct Rental {
    pub id: i64,
    pub client_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub rental_date: DateTime<Utc>,
    pub planned_return_date: DateTime<Utc>,
    pub return_request_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub status: RentalStatus,
}

impl Rental {
    /// A live rental holds the movie's availability.
    pub fn is_live(&self) -> bool {
        matches!(
            self.status,
            RentalStatus::Active | RentalStatus::PendingReturn
        )
    }
}

/// Input data for creating a rental in `active` status.
#[derive(Debug, Clone)]
pub struct NewRental {
    pub client_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub rental_date: DateTime<Utc>,
    pub planned_return_date: DateTime<Utc>,
}

impl NewRental {
    /// Builds the rental with the fixed 2-day window starting now.
    pub fn begin_now(client_id: i64, movie_id: i64, movie_title: String) -> Self {
        let now = Utc::now();
        Self {
            client_id,
            movie_id,
            movie_title,
            rental_date: now,
            planned_return_date: now + Duration::days(RENTAL_PERIOD_DAYS),
        }
    }
}

/// A rental joined with its client and movie for admin views.
///
/// Reference fields are optional: a dangling client or movie id degrades to
/// a placeholder at the API boundary instead of failing the listing.
#[derive(Debug, Clone)]
pub struct RentalDetails {
    pub rental: Rental,
    pub client_first_name: Option<String>,
    pub client_last_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub movie_title: Option<String>,
    pub movie_genres: Option<Vec<String>>,
}

impl RentalDetails {
    pub fn client_name(&self) -> Option<String> {
        match (&self.client_first_name, &self.client_last_name) {
            (None, None) => None,
            (first, last) => Some(format!(
                "{} {}",
                first.as_deref().unwrap_or(""),
                last.as_deref().unwrap_or("")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            RentalStatus::Active,
            RentalStatus::PendingReturn,
            RentalStatus::Returned,
        ] {
            assert_eq!(RentalStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RentalStatus::parse("overdue"), None);
    }

    #[test]
    fn test_begin_now_sets_two_day_window() {
        let new = NewRental::begin_now(1, 2, "Heat".to_string());
        assert_eq!(
            new.planned_return_date - new.rental_date,
            Duration::days(RENTAL_PERIOD_DAYS)
        );
    }

    #[test]
    fn test_live_statuses() {
        let mut rental = Rental {
            id: 1,
            client_id: 1,
            movie_id: 1,
            movie_title: String::new(),
            rental_date: Utc::now(),
            planned_return_date: Utc::now(),
            return_request_date: None,
            actual_return_date: None,
            status: RentalStatus::Active,
        };
        assert!(rental.is_live());
        rental.status = RentalStatus::PendingReturn;
        assert!(rental.is_live());
        rental.status = RentalStatus::Returned;
        assert!(!rental.is_live());
    }
}
