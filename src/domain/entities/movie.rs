//! Movie catalog entry.

use chrono::{DateTime, Datelike, Utc};

/// Earliest year accepted by the listing filter and create/update payloads.
pub const MIN_MOVIE_YEAR: i32 = 1800;

/// A catalog entry.
///
/// `is_available` is false exactly while one live (`active` or
/// `pending_return`) rental references this movie.
#[derive(Debug, Clone)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub language: String,
    pub country: String,
    pub duration: i32,
    pub description: String,
    pub director: String,
    pub rating: f64,
    pub actors: Vec<String>,
    pub added_date: DateTime<Utc>,
    pub is_available: bool,
}

/// Input data for creating a new movie.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub language: String,
    pub country: String,
    pub duration: i32,
    pub description: String,
    pub director: String,
    pub rating: f64,
    pub actors: Vec<String>,
    pub is_available: bool,
}

/// Partial update for an existing movie. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genres: Option<Vec<String>>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub duration: Option<i32>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub rating: Option<f64>,
    pub actors: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

/// Listing filter; a normalized rendering of it keys the listing cache.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFilter {
    pub available_only: bool,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
}

impl MovieFilter {
    /// Rejects out-of-range year filters.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(year) = self.year {
            let current = Utc::now().year();
            if year < MIN_MOVIE_YEAR || year > current {
                return Err(format!(
                    "year must be between {} and {}",
                    MIN_MOVIE_YEAR, current
                ));
            }
        }
        Ok(())
    }

    /// Normalized cache key for this filter + pagination tuple.
    pub fn cache_key(&self, page: i64, per_page: i64) -> String {
        format!(
            "page={}&per_page={}&available_only={}&genre={}&year={}&search={}",
            page,
            per_page,
            self.available_only,
            self.genre.as_deref().unwrap_or(""),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.search.as_deref().unwrap_or(""),
        )
    }
}

/// One page of movie listing results.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// `ceil(total / per_page)` without floating point.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    (total + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> MovieFilter {
        MovieFilter {
            available_only: true,
            genre: None,
            year: None,
            search: None,
        }
    }

    #[test]
    fn test_year_filter_bounds() {
        let mut f = filter();
        assert!(f.validate().is_ok());

        f.year = Some(1799);
        assert!(f.validate().is_err());

        f.year = Some(1800);
        assert!(f.validate().is_ok());

        f.year = Some(Utc::now().year());
        assert!(f.validate().is_ok());

        f.year = Some(Utc::now().year() + 1);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_cache_key_is_normalized() {
        let f = MovieFilter {
            available_only: false,
            genre: Some("Drama".to_string()),
            year: Some(1999),
            search: Some("matrix".to_string()),
        };
        assert_eq!(
            f.cache_key(2, 10),
            "page=2&per_page=10&available_only=false&genre=Drama&year=1999&search=matrix"
        );
        assert_eq!(filter().cache_key(1, 10), filter().cache_key(1, 10));
        assert_ne!(filter().cache_key(1, 10), filter().cache_key(2, 10));
    }

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        // Exhaustive ceiling property over a small grid.
        for total in 0..200i64 {
            for per_page in 1..20i64 {
                let expected = (total as f64 / per_page as f64).ceil() as i64;
                assert_eq!(total_pages(total, per_page), expected);
            }
        }
    }
}
