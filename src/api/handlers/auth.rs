//! Handlers for registration, login and the current-user endpoints.

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::api::dto::clients::ProfileUpdateRequest;
use crate::api::middleware::auth::CurrentClient;
use crate::application::services::{ProfileUpdateInput, RegisterInput};
use crate::error::AppError;
use crate::state::IdentityState;

/// Registers a new account and logs it in.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Errors
///
/// - 400 on validation failure
/// - 409 if the email is already registered
pub async fn register_handler(
    State(state): State<IdentityState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let (token, client) = state
        .identity_service
        .register(RegisterInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            address: payload.address,
            phone: payload.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse::bearer(token, client.into())),
    ))
}

/// Verifies credentials and issues a fresh token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 401 on an unknown email or wrong password; the message does not
/// say which.
pub async fn login_handler(
    State(state): State<IdentityState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let (token, client) = state
        .identity_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse::bearer(token, client.into())))
}

/// Returns the caller's own account.
///
/// # Endpoint
///
/// `GET /me`
pub async fn me_handler(
    Extension(CurrentClient(client)): Extension<CurrentClient>,
) -> Json<UserResponse> {
    Json(client.into())
}

/// Updates the caller's own profile and re-issues a token.
///
/// # Endpoint
///
/// `PUT /update-profile`
///
/// # Errors
///
/// Returns 400 if no fields are present, or if a password change comes
/// without a correct current password.
pub async fn update_me_handler(
    State(state): State<IdentityState>,
    Extension(CurrentClient(client)): Extension<CurrentClient>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let (token, updated) = state
        .identity_service
        .update_profile(
            &client,
            ProfileUpdateInput {
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                address: payload.address,
                new_password: payload.new_password,
                current_password: payload.current_password,
            },
        )
        .await?;

    Ok(Json(TokenResponse::bearer(token, updated.into())))
}
