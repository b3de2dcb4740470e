//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.

pub mod client_repository;
pub mod movie_repository;
pub mod rental_repository;

pub use client_repository::ClientRepository;
pub use movie_repository::MovieRepository;
pub use rental_repository::RentalRepository;

#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
#[cfg(test)]
pub use rental_repository::MockRentalRepository;
