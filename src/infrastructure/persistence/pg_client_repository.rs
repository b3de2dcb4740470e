//! PostgreSQL implementation of the client repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Client, ClientPatch, NewClient, Role};
use crate::domain::repositories::ClientRepository;
use crate::error::AppError;
use serde_json::json;

const CLIENT_COLUMNS: &str = "id, first_name, last_name, email, password_hash, address, phone, \
     role, registration_date, active_rentals_count";

#[derive(sqlx::FromRow)]
struct ClientRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    address: String,
    phone: String,
    role: String,
    registration_date: DateTime<Utc>,
    active_rentals_count: i32,
}

impl TryFrom<ClientRow> for Client {
    type Error = AppError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            AppError::internal("Corrupt client record", json!({ "id": row.id }))
        })?;
        Ok(Client {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            address: row.address,
            phone: row.phone,
            role,
            registration_date: row.registration_date,
            active_rentals_count: row.active_rentals_count,
        })
    }
}

/// PostgreSQL repository for client accounts.
pub struct PgClientRepository {
    pool: Arc<PgPool>,
}

impl PgClientRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "INSERT INTO clients (first_name, last_name, email, password_hash, address, phone, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(&new_client.first_name)
        .bind(&new_client.last_name)
        .bind(&new_client.email)
        .bind(&new_client.password_hash)
        .bind(&new_client.address)
        .bind(&new_client.phone)
        .bind(new_client.role.as_str())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                AppError::conflict("Email already registered", json!({ "email": new_client.email }))
            }
            _ => e.into(),
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Client>, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients
             WHERE LOWER(first_name) = LOWER($1) AND LOWER(last_name) = LOWER($2)
             ORDER BY id
             LIMIT 1"
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Client::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY registration_date"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn update(&self, id: i64, patch: ClientPatch) -> Result<Client, AppError> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "UPDATE clients SET
                 first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 phone = COALESCE($4, phone),
                 address = COALESCE($5, address),
                 password_hash = COALESCE($6, password_hash),
                 role = COALESCE($7, role)
             WHERE id = $1
             RETURNING {CLIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.first_name)
        .bind(patch.last_name)
        .bind(patch.phone)
        .bind(patch.address)
        .bind(patch.password_hash)
        .bind(patch.role.map(|r| r.as_str().to_string()))
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Client not found", json!({ "id": id })))?;

        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
