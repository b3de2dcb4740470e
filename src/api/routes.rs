//! API route configuration for the two components.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::api::handlers::{
    admin_rent_handler, admin_rentals_handler, approve_return_handler, catalog_health_handler,
    create_client_handler, create_movie_handler, delete_client_handler, delete_movie_handler,
    delete_rental_handler, genres_handler, get_client_handler, get_movie_handler,
    identity_health_handler, list_clients_handler, list_movies_handler, login_handler,
    me_handler, my_rentals_handler, pending_returns_handler, register_handler,
    rent_movie_handler, return_movie_handler, update_client_handler, update_me_handler,
    update_movie_handler,
};
use crate::state::{CatalogState, IdentityState};

/// Identity endpoints reachable without a token.
///
/// - `POST /register` - Create an account and log in
/// - `POST /login`    - Exchange credentials for a token
/// - `GET  /health`   - Component health
pub fn identity_public_routes() -> Router<IdentityState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/health", get(identity_health_handler))
}

/// Identity endpoints behind Bearer authentication.
///
/// - `GET    /me`             - The caller's account
/// - `PUT    /update-profile` - Update the caller's profile
/// - `GET    /clients`        - List accounts (admin)
/// - `POST   /clients`        - Create an account with a role (admin)
/// - `GET    /clients/{id}`   - Fetch an account (admin)
/// - `PUT    /clients/{id}`   - Update an account (admin)
/// - `DELETE /clients/{id}`   - Delete an account (admin)
pub fn identity_protected_routes() -> Router<IdentityState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/update-profile", put(update_me_handler))
        .route(
            "/clients",
            get(list_clients_handler).post(create_client_handler),
        )
        .route(
            "/clients/{id}",
            get(get_client_handler)
                .put(update_client_handler)
                .delete(delete_client_handler),
        )
}

/// Catalog endpoints reachable without a token.
pub fn catalog_public_routes() -> Router<CatalogState> {
    Router::new().route("/health", get(catalog_health_handler))
}

/// Catalog endpoints behind identity resolution.
///
/// - `GET    /movies`                - Paginated, filtered listing
/// - `POST   /movies`                - Add a movie (admin)
/// - `GET    /movies/{id}`           - Fetch a movie
/// - `PUT    /movies/{id}`           - Update a movie (admin)
/// - `DELETE /movies/{id}`           - Delete a movie (admin)
/// - `GET    /genres`                - Distinct genres
/// - `POST   /rent/{movieId}`        - Rent for the caller
/// - `POST   /return/{movieId}`      - Request a return
/// - `GET    /rentals/me`            - The caller's rental history
/// - `GET    /rentals/pending`       - Returns awaiting approval (admin)
/// - `POST   /rentals/{id}/approve`  - Complete a return (admin)
/// - `DELETE /rentals/{id}`          - Delete an own returned rental
/// - `POST   /admin/rent`            - Rent on behalf of a client (admin)
/// - `GET    /admin/rentals`         - Rental history with search (admin)
pub fn catalog_protected_routes() -> Router<CatalogState> {
    Router::new()
        .route(
            "/movies",
            get(list_movies_handler).post(create_movie_handler),
        )
        .route(
            "/movies/{id}",
            get(get_movie_handler)
                .put(update_movie_handler)
                .delete(delete_movie_handler),
        )
        .route("/genres", get(genres_handler))
        .route("/rent/{id}", post(rent_movie_handler))
        .route("/return/{id}", post(return_movie_handler))
        .route("/rentals/me", get(my_rentals_handler))
        .route("/rentals/pending", get(pending_returns_handler))
        .route("/rentals/{id}/approve", post(approve_return_handler))
        .route("/rentals/{id}", delete(delete_rental_handler))
        .route("/admin/rent", post(admin_rent_handler))
        .route("/admin/rentals", get(admin_rentals_handler))
}
