//! Identity resolution seam between the catalog and identity components.

use crate::domain::entities::Role;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The caller's identity as reported by the identity component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub role: Role,
    pub registration_date: DateTime<Utc>,
    pub active_rentals_count: i32,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Translates a bearer token into the caller's identity.
///
/// Every protected catalog request resolves the caller through this seam.
/// A resolver must never serve a cached "last known good" identity: a
/// timed-out or unreachable identity component surfaces as
/// [`AppError::ServiceUnavailable`], distinct from bad credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] when the identity component rejects the token
    /// - [`AppError::ServiceUnavailable`] when it cannot be reached in time
    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError>;

    /// Identity component reachability probe for health checks.
    async fn health_check(&self) -> bool;
}
