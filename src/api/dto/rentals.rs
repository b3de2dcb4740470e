//! DTOs for rental endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use validator::Validate;

use crate::domain::entities::{Rental, RentalDetails};

/// Placeholder shown when a rental references a deleted client.
const UNKNOWN_CLIENT: &str = "Unknown client";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    pub id: i64,
    pub client_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub rental_date: DateTime<Utc>,
    pub planned_return_date: DateTime<Utc>,
    pub return_request_date: Option<DateTime<Utc>>,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub status: String,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            client_id: rental.client_id,
            movie_id: rental.movie_id,
            movie_title: rental.movie_title,
            rental_date: rental.rental_date,
            planned_return_date: rental.planned_return_date,
            return_request_date: rental.return_request_date,
            actual_return_date: rental.actual_return_date,
            status: rental.status.as_str().to_string(),
        }
    }
}

/// Admin view of a rental joined with client and movie data.
///
/// A deleted client or movie degrades to placeholders instead of breaking
/// the listing; the denormalized `movie_title` on the rental survives movie
/// deletion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetailsResponse {
    #[serde(flatten)]
    pub rental: RentalResponse,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub movie_genres: Vec<String>,
}

impl From<RentalDetails> for RentalDetailsResponse {
    fn from(details: RentalDetails) -> Self {
        let client_name = details
            .client_name()
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
        Self {
            client_name,
            client_email: details.client_email,
            client_phone: details.client_phone,
            movie_genres: details.movie_genres.unwrap_or_default(),
            rental: details.rental.into(),
        }
    }
}

/// Admin request to rent on behalf of a client, passed as query parameters.
///
/// `client_identifier` is free-form: a numeric id, an email address or a
/// `"First Last"` name.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct AdminRentParams {
    #[validate(length(min = 1, message = "Client identifier must not be empty"))]
    pub client_identifier: String,

    #[serde_as(as = "DisplayFromStr")]
    pub movie_id: i64,
}

/// Response to an admin-initiated rental.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRentResponse {
    pub rental: RentalResponse,
    pub client_name: String,
    pub client_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RentalStatus;

    fn rental() -> Rental {
        Rental {
            id: 1,
            client_id: 2,
            movie_id: 3,
            movie_title: "Heat".to_string(),
            rental_date: Utc::now(),
            planned_return_date: Utc::now(),
            return_request_date: None,
            actual_return_date: None,
            status: RentalStatus::Active,
        }
    }

    #[test]
    fn test_rental_response_shape() {
        let json = serde_json::to_value(RentalResponse::from(rental())).unwrap();
        assert_eq!(json["status"], "active");
        assert!(json.get("clientId").is_some());
        assert!(json.get("plannedReturnDate").is_some());
    }

    #[test]
    fn test_dangling_client_degrades_to_placeholder() {
        let details = RentalDetails {
            rental: rental(),
            client_first_name: None,
            client_last_name: None,
            client_email: None,
            client_phone: None,
            movie_title: None,
            movie_genres: None,
        };
        let response = RentalDetailsResponse::from(details);
        assert_eq!(response.client_name, "Unknown client");
        assert!(response.movie_genres.is_empty());
        // The denormalized title is still there.
        assert_eq!(response.rental.movie_title, "Heat");
    }

    #[test]
    fn test_admin_rent_params_parse_from_query_strings() {
        let params: AdminRentParams = serde_json::from_value(serde_json::json!({
            "client_identifier": "jan@example.com",
            "movie_id": "42",
        }))
        .unwrap();
        assert_eq!(params.movie_id, 42);
        assert!(params.validate().is_ok());

        let empty = AdminRentParams {
            client_identifier: String::new(),
            movie_id: 1,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_details_response_flattens_rental_fields() {
        let details = RentalDetails {
            rental: rental(),
            client_first_name: Some("Jan".to_string()),
            client_last_name: Some("Kowalski".to_string()),
            client_email: Some("jan@example.com".to_string()),
            client_phone: None,
            movie_title: Some("Heat".to_string()),
            movie_genres: Some(vec!["Crime".to_string()]),
        };
        let json = serde_json::to_value(RentalDetailsResponse::from(details)).unwrap();
        assert_eq!(json["clientName"], "Jan Kowalski");
        assert_eq!(json["movieTitle"], "Heat");
        assert_eq!(json["status"], "active");
    }
}
