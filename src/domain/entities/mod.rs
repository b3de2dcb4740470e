//! Core business entities.

pub mod client;
pub mod movie;
pub mod rental;

pub use client::{Client, ClientPatch, NewClient, Role};
pub use movie::{total_pages, Movie, MovieFilter, MoviePage, MoviePatch, NewMovie, MIN_MOVIE_YEAR};
pub use rental::{
    NewRental, Rental, RentalDetails, RentalStatus, MAX_ACTIVE_RENTALS, RENTAL_PERIOD_DAYS,
};
