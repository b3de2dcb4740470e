//! DTOs for the movie catalog endpoints.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{Movie, MoviePage, MoviePatch, NewMovie, MIN_MOVIE_YEAR};

fn validate_year(year: i32) -> Result<(), ValidationError> {
    if year < MIN_MOVIE_YEAR || year > Utc::now().year() {
        return Err(ValidationError::new("year_out_of_range"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieCreateRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(custom(function = "validate_year"))]
    pub year: i32,

    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub country: String,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: i32,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub director: String,

    #[validate(range(min = 0.0, max = 10.0))]
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub actors: Vec<String>,

    #[serde(default = "default_available", rename = "is_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl From<MovieCreateRequest> for NewMovie {
    fn from(request: MovieCreateRequest) -> Self {
        NewMovie {
            title: request.title,
            year: request.year,
            genres: request.genres,
            language: request.language,
            country: request.country,
            duration: request.duration,
            description: request.description,
            director: request.director,
            rating: request.rating,
            actors: request.actors,
            is_available: request.is_available,
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct MovieUpdateRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_year"))]
    pub year: Option<i32>,

    pub genres: Option<Vec<String>>,
    pub language: Option<String>,
    pub country: Option<String>,

    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: Option<i32>,

    pub description: Option<String>,
    pub director: Option<String>,

    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,

    pub actors: Option<Vec<String>>,

    #[serde(rename = "is_available")]
    pub is_available: Option<bool>,
}

impl From<MovieUpdateRequest> for MoviePatch {
    fn from(request: MovieUpdateRequest) -> Self {
        MoviePatch {
            title: request.title,
            year: request.year,
            genres: request.genres,
            language: request.language,
            country: request.country,
            duration: request.duration,
            description: request.description,
            director: request.director,
            rating: request.rating,
            actors: request.actors,
            is_available: request.is_available,
        }
    }
}

/// Public view of a catalog entry.
///
/// `is_available` keeps its historical snake_case name on the wire; every
/// other field is camelCase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
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
    #[serde(rename = "is_available")]
    pub is_available: bool,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            year: movie.year,
            genres: movie.genres,
            language: movie.language,
            country: movie.country,
            duration: movie.duration,
            description: movie.description,
            director: movie.director,
            rating: movie.rating,
            actors: movie.actors,
            added_date: movie.added_date,
            is_available: movie.is_available,
        }
    }
}

/// One listing page with pagination metadata.
#[derive(Debug, Serialize)]
pub struct MoviesListResponse {
    pub movies: Vec<MovieResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<MoviePage> for MoviesListResponse {
    fn from(page: MoviePage) -> Self {
        Self {
            movies: page.movies.into_iter().map(MovieResponse::from).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

/// Genre list for filter dropdowns.
#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(year: i32) -> MovieCreateRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Heat",
            "year": year,
            "duration": 170,
        }))
        .unwrap()
    }

    #[test]
    fn test_year_bounds() {
        assert!(create_request(1995).validate().is_ok());
        assert!(create_request(1799).validate().is_err());
        assert!(create_request(Utc::now().year() + 1).validate().is_err());
    }

    #[test]
    fn test_availability_defaults_to_true() {
        assert!(create_request(1995).is_available);
    }

    #[test]
    fn test_is_available_keeps_snake_case_on_the_wire() {
        let response = MovieResponse {
            id: 1,
            title: "Heat".to_string(),
            year: 1995,
            genres: vec![],
            language: String::new(),
            country: String::new(),
            duration: 170,
            description: String::new(),
            director: String::new(),
            rating: 8.3,
            actors: vec![],
            added_date: Utc::now(),
            is_available: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("is_available").is_some());
        assert!(json.get("isAvailable").is_none());
        assert!(json.get("addedDate").is_some());
    }
}
