//! Shared handler state for the two components.

use std::sync::Arc;

use crate::application::services::{IdentityService, MovieService, RentalService};
use crate::domain::identity::IdentityResolver;

/// State of the identity component.
#[derive(Clone)]
pub struct IdentityState {
    pub identity_service: Arc<IdentityService>,
}

/// State of the catalog component.
#[derive(Clone)]
pub struct CatalogState {
    pub movie_service: Arc<MovieService>,
    pub rental_service: Arc<RentalService>,
    pub identity_resolver: Arc<dyn IdentityResolver>,
}
