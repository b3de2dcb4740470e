//! HTTP request handlers.

pub mod auth;
pub mod clients;
pub mod health;
pub mod movies;
pub mod rentals;

pub use auth::{login_handler, me_handler, register_handler, update_me_handler};
pub use clients::{
    create_client_handler, delete_client_handler, get_client_handler, list_clients_handler,
    update_client_handler,
};
pub use health::{catalog_health_handler, identity_health_handler};
pub use movies::{
    create_movie_handler, delete_movie_handler, genres_handler, get_movie_handler,
    list_movies_handler, update_movie_handler,
};
pub use rentals::{
    admin_rent_handler, admin_rentals_handler, approve_return_handler, delete_rental_handler,
    my_rentals_handler, pending_returns_handler, rent_movie_handler, return_movie_handler,
};
