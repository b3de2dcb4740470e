//! Repository trait for client account data access.

use crate::domain::entities::{Client, ClientPatch, NewClient};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for client accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClientRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`; in-memory fakes live in `tests/common`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Creates a new client account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered
    /// (unique index enforced at the store).
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError>;

    /// Case-insensitive exact match on first + last name. First match wins.
    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Client>, AppError>;

    async fn list(&self) -> Result<Vec<Client>, AppError>;

    /// Partially updates a client. Only `Some` fields of the patch change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no client matches `id`.
    async fn update(&self, id: i64, patch: ClientPatch) -> Result<Client, AppError>;

    /// Hard-deletes a client. Returns `false` if no client matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Store connectivity probe for health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
