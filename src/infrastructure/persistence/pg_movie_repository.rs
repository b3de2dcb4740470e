//! PostgreSQL implementation of the movie repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Movie, MovieFilter, MoviePatch, NewMovie};
use crate::domain::repositories::MovieRepository;
use crate::error::AppError;

const MOVIE_COLUMNS: &str = "id, title, year, genres, language, country, duration, description, \
     director, rating, actors, added_date, is_available";

// Nullable binds keep a single prepared statement for every filter shape.
const FILTER_CLAUSE: &str = "($1 = FALSE OR is_available = TRUE)
       AND ($2::text IS NULL OR $2 = ANY(genres))
       AND ($3::int4 IS NULL OR year = $3)
       AND ($4::text IS NULL
            OR movie_search_document(title, description, director, actors)
               @@ plainto_tsquery('simple', $4))";

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    year: i32,
    genres: Vec<String>,
    language: String,
    country: String,
    duration: i32,
    description: String,
    director: String,
    rating: f64,
    actors: Vec<String>,
    added_date: DateTime<Utc>,
    is_available: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            year: row.year,
            genres: row.genres,
            language: row.language,
            country: row.country,
            duration: row.duration,
            description: row.description,
            director: row.director,
            rating: row.rating,
            actors: row.actors,
            added_date: row.added_date,
            is_available: row.is_available,
        }
    }
}

/// PostgreSQL repository for catalog entries.
pub struct PgMovieRepository {
    pool: Arc<PgPool>,
}

impl PgMovieRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "INSERT INTO movies (title, year, genres, language, country, duration,
                                 description, director, rating, actors, is_available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(&new_movie.title)
        .bind(new_movie.year)
        .bind(&new_movie.genres)
        .bind(&new_movie.language)
        .bind(&new_movie.country)
        .bind(new_movie.duration)
        .bind(&new_movie.description)
        .bind(&new_movie.director)
        .bind(new_movie.rating)
        .bind(&new_movie.actors)
        .bind(new_movie.is_available)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Movie::from))
    }

    async fn list(
        &self,
        filter: &MovieFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, AppError> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies
             WHERE {FILTER_CLAUSE}
             ORDER BY added_date DESC, id DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(filter.available_only)
        .bind(filter.genre.as_deref())
        .bind(filter.year)
        .bind(filter.search.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn count(&self, filter: &MovieFilter) -> Result<i64, AppError> {
        let total: (i64,) = sqlx::query_as(&format!(
            "SELECT COUNT(*) FROM movies WHERE {FILTER_CLAUSE}"
        ))
        .bind(filter.available_only)
        .bind(filter.genre.as_deref())
        .bind(filter.year)
        .bind(filter.search.as_deref())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total.0)
    }

    async fn update(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "UPDATE movies SET
                 title = COALESCE($2, title),
                 year = COALESCE($3, year),
                 genres = COALESCE($4, genres),
                 language = COALESCE($5, language),
                 country = COALESCE($6, country),
                 duration = COALESCE($7, duration),
                 description = COALESCE($8, description),
                 director = COALESCE($9, director),
                 rating = COALESCE($10, rating),
                 actors = COALESCE($11, actors),
                 is_available = COALESCE($12, is_available)
             WHERE id = $1
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.year)
        .bind(patch.genres)
        .bind(patch.language)
        .bind(patch.country)
        .bind(patch.duration)
        .bind(patch.description)
        .bind(patch.director)
        .bind(patch.rating)
        .bind(patch.actors)
        .bind(patch.is_available)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Movie not found", json!({ "id": id })))?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn distinct_genres(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT unnest(genres) AS genre FROM movies ORDER BY genre",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(|(g,)| g).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
