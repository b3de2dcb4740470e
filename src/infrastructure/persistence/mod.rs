//! PostgreSQL implementations of the domain repository traits.

mod pg_client_repository;
mod pg_movie_repository;
mod pg_rental_repository;

pub use pg_client_repository::PgClientRepository;
pub use pg_movie_repository::PgMovieRepository;
pub use pg_rental_repository::PgRentalRepository;
