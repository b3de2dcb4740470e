//! Query parameters for listing endpoints.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use crate::application::services::{RentalHistoryQuery, RentalSortField};
use crate::domain::entities::{MovieFilter, RentalStatus};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;
const MAX_PER_PAGE: i64 = 100;

/// Catalog listing query parameters.
///
/// Uses `serde_with` to parse numbers and booleans from query strings.
#[serde_as]
#[derive(Debug, Deserialize, Default)]
pub struct ListMoviesParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub available_only: Option<bool>,

    pub genre: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub year: Option<i32>,

    pub search: Option<String>,
}

impl ListMoviesParams {
    /// Validates pagination bounds and splits into a filter plus page tuple.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `per_page`: 10 (max 100)
    /// - `available_only`: true
    pub fn validate_and_split(self) -> Result<(MovieFilter, i64, i64), String> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page < 1 {
            return Err("Page must be greater than 0".to_string());
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(format!("Per page must be between 1 and {MAX_PER_PAGE}"));
        }

        let filter = MovieFilter {
            available_only: self.available_only.unwrap_or(true),
            genre: self.genre.filter(|g| !g.trim().is_empty()),
            year: self.year,
            search: self.search.filter(|s| !s.trim().is_empty()),
        };
        Ok((filter, page, per_page))
    }
}

/// Admin rental-history query parameters.
#[derive(Debug, Deserialize, Default)]
pub struct RentalHistoryParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl RentalHistoryParams {
    /// # Defaults
    ///
    /// - `sort_by`: `rentalDate`
    /// - `sort_order`: `desc`
    pub fn validate_into_query(self) -> Result<RentalHistoryQuery, String> {
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                RentalStatus::parse(raw)
                    .ok_or_else(|| format!("Unknown rental status: {raw}"))?,
            ),
            None => None,
        };

        let sort_by = match self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => RentalSortField::parse(raw)
                .ok_or_else(|| format!("Unknown sort field: {raw}"))?,
            None => RentalSortField::default(),
        };

        let descending = match self.sort_order.as_deref().filter(|s| !s.is_empty()) {
            Some("asc") => false,
            Some("desc") | None => true,
            Some(other) => return Err(format!("Unknown sort order: {other}")),
        };

        Ok(RentalHistoryQuery {
            search: self.search,
            status,
            sort_by,
            descending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_defaults() {
        let (filter, page, per_page) = ListMoviesParams::default()
            .validate_and_split()
            .unwrap();
        assert_eq!(page, 1);
        assert_eq!(per_page, 10);
        assert!(filter.available_only);
        assert!(filter.genre.is_none());
    }

    #[test]
    fn test_listing_bounds() {
        let zero_page = ListMoviesParams {
            page: Some(0),
            ..Default::default()
        };
        assert!(zero_page.validate_and_split().is_err());

        let oversized = ListMoviesParams {
            per_page: Some(101),
            ..Default::default()
        };
        assert!(oversized.validate_and_split().is_err());

        let at_max = ListMoviesParams {
            per_page: Some(100),
            ..Default::default()
        };
        assert!(at_max.validate_and_split().is_ok());
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let params = ListMoviesParams {
            search: Some("   ".to_string()),
            genre: Some(String::new()),
            ..Default::default()
        };
        let (filter, _, _) = params.validate_and_split().unwrap();
        assert!(filter.search.is_none());
        assert!(filter.genre.is_none());
    }

    #[test]
    fn test_query_string_parsing() {
        // Query-string values always arrive as strings.
        let params: ListMoviesParams = serde_json::from_value(serde_json::json!({
            "page": "2",
            "per_page": "25",
            "available_only": "false",
            "year": "1999",
        }))
        .unwrap();
        let (filter, page, per_page) = params.validate_and_split().unwrap();
        assert_eq!(page, 2);
        assert_eq!(per_page, 25);
        assert!(!filter.available_only);
        assert_eq!(filter.year, Some(1999));
    }

    #[test]
    fn test_history_defaults_to_rental_date_desc() {
        let query = RentalHistoryParams::default()
            .validate_into_query()
            .unwrap();
        assert_eq!(query.sort_by, RentalSortField::RentalDate);
        assert!(query.descending);
        assert!(query.status.is_none());
    }

    #[test]
    fn test_history_rejects_unknown_values() {
        let bad_status = RentalHistoryParams {
            status: Some("overdue".to_string()),
            ..Default::default()
        };
        assert!(bad_status.validate_into_query().is_err());

        let bad_sort = RentalHistoryParams {
            sort_by: Some("color".to_string()),
            ..Default::default()
        };
        assert!(bad_sort.validate_into_query().is_err());

        let bad_order = RentalHistoryParams {
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(bad_order.validate_into_query().is_err());
    }

    #[test]
    fn test_history_parses_status_and_order() {
        let params = RentalHistoryParams {
            status: Some("pending_return".to_string()),
            sort_by: Some("clientName".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let query = params.validate_into_query().unwrap();
        assert_eq!(query.status, Some(RentalStatus::PendingReturn));
        assert_eq!(query.sort_by, RentalSortField::ClientName);
        assert!(!query.descending);
    }
}
