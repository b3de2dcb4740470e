//! Application services implementing the use cases behind the HTTP API.

mod identity_service;
mod movie_service;
mod rental_service;

pub use identity_service::{
    AdminClientInput, AdminClientUpdate, IdentityService, ProfileUpdateInput, RegisterInput,
};
pub use movie_service::MovieService;
pub use rental_service::{RentalHistoryQuery, RentalService, RentalSortField};
