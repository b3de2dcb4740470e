//! Bearer token authentication for the identity component.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::Client;
use crate::error::AppError;
use crate::state::IdentityState;

/// The authenticated account, inserted into request extensions by
/// [`layer`] and read back by handlers.
#[derive(Debug, Clone)]
pub struct CurrentClient(pub Client);

/// Authenticates requests against the local token codec and client store.
///
/// Verifies the bearer token's signature and expiry, then loads the account
/// it was issued for. A token for a deleted account is rejected.
///
/// Adds `WWW-Authenticate: Bearer` to 401 responses per RFC 6750.
pub async fn layer(
    State(state): State<IdentityState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Not authenticated",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let client = state.identity_service.resolve_token(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentClient(client));

    Ok(next.run(req).await)
}

/// Rejects non-admin callers with 403.
pub fn require_admin(client: &Client) -> Result<(), AppError> {
    if !client.is_admin() {
        return Err(AppError::forbidden(
            "Access forbidden. Admin role required.",
            json!({}),
        ));
    }
    Ok(())
}
