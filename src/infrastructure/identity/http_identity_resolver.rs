//! HTTP client for the identity component.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::identity::{AuthUser, IdentityResolver};
use crate::error::AppError;

/// Resolves bearer tokens by calling the identity component over HTTP.
///
/// A 401/403 from the identity component means the token is bad; anything
/// that prevents an answer (timeout, connection refused, 5xx) surfaces as
/// `ServiceUnavailable` so callers can tell the two apart.
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityResolver {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build identity HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError> {
        let url = format!("{}/me", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Identity component unreachable");
                AppError::service_unavailable(
                    "Identity service is unavailable",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        match response.status() {
            StatusCode::OK => response.json::<AuthUser>().await.map_err(|e| {
                warn!(error = %e, "Identity component returned a malformed body");
                AppError::service_unavailable(
                    "Identity service returned an invalid response",
                    json!({ "reason": e.to_string() }),
                )
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Identity component rejected the token");
                Err(AppError::unauthorized(
                    "Invalid authentication credentials",
                    json!({}),
                ))
            }
            status => {
                warn!(%status, "Unexpected identity component response");
                Err(AppError::service_unavailable(
                    "Identity service is unavailable",
                    json!({ "status": status.as_u16() }),
                ))
            }
        }
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Identity health probe failed");
                false
            }
        }
    }
}
