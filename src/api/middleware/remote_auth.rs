//! Bearer token authentication for the catalog component.
//!
//! The catalog never verifies tokens itself; every request is resolved
//! through the identity component so revoked accounts and role changes take
//! effect immediately. An unreachable identity component yields 503, not
//! 401, so clients can tell an outage from bad credentials.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::identity::AuthUser;
use crate::error::AppError;
use crate::state::CatalogState;

/// Resolves the caller through the identity component and inserts the
/// resulting [`AuthUser`] into request extensions.
pub async fn layer(
    State(state): State<CatalogState>,
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

    let user = state.identity_resolver.resolve(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Rejects non-admin callers with 403.
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::forbidden(
            "Access forbidden. Admin role required.",
            json!({}),
        ));
    }
    Ok(())
}
