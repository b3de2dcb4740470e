//! Request and response types for the HTTP API.
//!
//! Wire format: camelCase field names, except `is_available` and the
//! pagination metadata, which keep their historical snake_case names.

pub mod auth;
pub mod clients;
pub mod health;
pub mod movies;
pub mod pagination;
pub mod rentals;
