//! Handlers for admin client management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::api::dto::auth::UserResponse;
use crate::api::dto::clients::{ClientCreateRequest, ClientUpdateRequest};
use crate::api::middleware::auth::{require_admin, CurrentClient};
use crate::application::services::{AdminClientInput, AdminClientUpdate};
use crate::error::AppError;
use crate::state::IdentityState;
use crate::utils::parse_id;

/// Lists all client accounts.
///
/// # Endpoint
///
/// `GET /clients` (admin)
pub async fn list_clients_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(caller)): Extension<CurrentClient>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    require_admin(&caller)?;
    let clients = state.identity_service.list_clients().await?;
    Ok(Json(clients.into_iter().map(UserResponse::from).collect()))
}

/// Fetches a single client account.
///
/// # Endpoint
///
/// `GET /clients/{id}` (admin)
pub async fn get_client_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(caller)): Extension<CurrentClient>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id, "client")?;
    let client = state.identity_service.get_client(id).await?;
    Ok(Json(client.into()))
}

/// Creates a client with an explicit role.
///
/// # Endpoint
///
/// `POST /clients` (admin)
///
/// # Errors
///
/// - 400 on validation failure or an unknown role
/// - 409 if the email is already registered
pub async fn create_client_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(caller)): Extension<CurrentClient>,
    Json(payload): Json<ClientCreateRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    require_admin(&caller)?;
    payload.validate()?;

    let client = state
        .identity_service
        .create_client(AdminClientInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            address: payload.address,
            phone: payload.phone,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(client.into())))
}

/// Partially updates a client.
///
/// # Endpoint
///
/// `PUT /clients/{id}` (admin)
///
/// # Errors
///
/// Returns 400 when an admin tries to change their own role.
pub async fn update_client_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(caller)): Extension<CurrentClient>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdateRequest>,
) -> Result<Json<UserResponse>, AppError> {
    require_admin(&caller)?;
    payload.validate()?;
    let id = parse_id(&id, "client")?;

    let client = state
        .identity_service
        .update_client(
            &caller,
            id,
            AdminClientUpdate {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                address: payload.address,
                password: payload.password,
                role: payload.role,
            },
        )
        .await?;

    Ok(Json(client.into()))
}

/// Deletes a client.
///
/// # Endpoint
///
/// `DELETE /clients/{id}` (admin)
///
/// # Errors
///
/// Returns 400 when an admin tries to delete their own account.
pub async fn delete_client_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(caller)): Extension<CurrentClient>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id, "client")?;
    state.identity_service.delete_client(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
