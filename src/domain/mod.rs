//! Domain layer: entities, repository traits, identity-resolution seam.

pub mod entities;
pub mod identity;
pub mod repositories;
