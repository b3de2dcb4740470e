//! Account registration, login, token resolution and admin client management.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Client, ClientPatch, NewClient, Role};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;
use crate::utils::{PasswordHasher, TokenCodec};

/// Self-service registration input. Role is always `user`.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
}

/// Self-service profile update. A password change requires the current
/// password to be supplied and to verify.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub new_password: Option<String>,
    pub current_password: Option<String>,
}

/// Admin-side client creation; unlike registration, the role is free.
#[derive(Debug, Clone)]
pub struct AdminClientInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
    pub role: String,
}

/// Admin-side partial client update.
#[derive(Debug, Clone, Default)]
pub struct AdminClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Use cases of the identity component.
pub struct IdentityService {
    clients: Arc<dyn ClientRepository>,
    hasher: PasswordHasher,
    tokens: TokenCodec,
}

impl IdentityService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        hasher: PasswordHasher,
        tokens: TokenCodec,
    ) -> Self {
        Self {
            clients,
            hasher,
            tokens,
        }
    }

    /// Registers a new account and logs it in.
    pub async fn register(&self, input: RegisterInput) -> Result<(String, Client), AppError> {
        if self.clients.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": input.email }),
            ));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let client = self
            .clients
            .create(NewClient {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                address: input.address,
                phone: input.phone,
                role: Role::User,
            })
            .await?;

        info!(client_id = client.id, "registered new client");
        let token = self.tokens.issue(&client.email)?;
        Ok((token, client))
    }

    /// Verifies credentials and issues a fresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Client), AppError> {
        let client = self
            .clients
            .find_by_email(email)
            .await?
            .filter(|c| self.hasher.verify(password, &c.password_hash))
            .ok_or_else(|| {
                AppError::unauthorized("Incorrect email or password", json!({}))
            })?;

        let token = self.tokens.issue(&client.email)?;
        Ok((token, client))
    }

    /// Resolves a bearer token to the account it was issued for.
    pub async fn resolve_token(&self, token: &str) -> Result<Client, AppError> {
        let email = self.tokens.verify(token)?;
        self.clients
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Could not validate credentials", json!({}))
            })
    }

    /// Applies a self-service profile update and re-issues a token.
    pub async fn update_profile(
        &self,
        current: &Client,
        input: ProfileUpdateInput,
    ) -> Result<(String, Client), AppError> {
        let password_hash = match input.new_password {
            Some(new_password) => {
                let current_password = input.current_password.as_deref().ok_or_else(|| {
                    AppError::bad_request(
                        "Current password is required to change the password",
                        json!({}),
                    )
                })?;
                if !self.hasher.verify(current_password, &current.password_hash) {
                    return Err(AppError::bad_request(
                        "Current password is incorrect",
                        json!({}),
                    ));
                }
                Some(self.hasher.hash(&new_password)?)
            }
            None => None,
        };

        let patch = ClientPatch {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            password_hash,
            role: None,
        };
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        let client = self.clients.update(current.id, patch).await?;
        let token = self.tokens.issue(&client.email)?;
        Ok((token, client))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.clients.list().await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, AppError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found", json!({ "id": id })))
    }

    /// Creates a client with an explicit role (admin operation).
    pub async fn create_client(&self, input: AdminClientInput) -> Result<Client, AppError> {
        let role = Role::parse(&input.role).ok_or_else(|| {
            AppError::bad_request(
                "Role must be 'user' or 'admin'",
                json!({ "role": input.role }),
            )
        })?;

        if self.clients.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": input.email }),
            ));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        self.clients
            .create(NewClient {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                address: input.address,
                phone: input.phone,
                role,
            })
            .await
    }

    /// Partially updates a client (admin operation).
    ///
    /// An admin cannot change their own role; demoting the last admin by
    /// accident would lock the admin surface.
    pub async fn update_client(
        &self,
        admin: &Client,
        id: i64,
        input: AdminClientUpdate,
    ) -> Result<Client, AppError> {
        let role = match input.role {
            Some(raw) => {
                if id == admin.id {
                    return Err(AppError::bad_request(
                        "Administrators cannot change their own role",
                        json!({ "id": id }),
                    ));
                }
                Some(Role::parse(&raw).ok_or_else(|| {
                    AppError::bad_request(
                        "Role must be 'user' or 'admin'",
                        json!({ "role": raw }),
                    )
                })?)
            }
            None => None,
        };

        let password_hash = input
            .password
            .map(|p| self.hasher.hash(&p))
            .transpose()?;

        let patch = ClientPatch {
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            password_hash,
            role,
        };
        if patch.is_empty() {
            return Err(AppError::bad_request("No fields to update", json!({})));
        }

        self.clients.update(id, patch).await
    }

    /// Deletes a client (admin operation). Self-deletion is rejected.
    pub async fn delete_client(&self, admin: &Client, id: i64) -> Result<(), AppError> {
        if id == admin.id {
            return Err(AppError::bad_request(
                "Administrators cannot delete their own account",
                json!({ "id": id }),
            ));
        }
        if !self.clients.delete(id).await? {
            return Err(AppError::not_found("Client not found", json!({ "id": id })));
        }
        info!(client_id = id, "deleted client");
        Ok(())
    }

    /// Store connectivity probe for the health endpoint.
    pub async fn ping_store(&self) -> Result<(), AppError> {
        self.clients.ping().await
    }
}
