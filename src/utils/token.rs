//! Short-lived signed access tokens.
//!
//! HS256 tokens carrying the subject email and an expiry; signature and
//! expiry are checked on every verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Issues and verifies bearer tokens for the identity component.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_minutes: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expire_minutes,
        }
    }

    /// Issues a token with `sub = email` expiring after the configured TTL.
    pub fn issue(&self, email: &str) -> Result<String, AppError> {
        let claims = Claims {
            sub: email.to_string(),
            exp: (Utc::now() + Duration::minutes(self.expire_minutes)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "token encoding failed");
            AppError::internal("Token encoding failed", json!({}))
        })
    }

    /// Verifies signature and expiry, returning the subject email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on any malformed, tampered or
    /// expired token.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|_| {
                AppError::unauthorized(
                    "Could not validate credentials",
                    json!({ "reason": "invalid or expired token" }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", 30)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = codec();
        let token = codec.issue("jan@example.com").unwrap();
        assert_eq!(codec.verify(&token).unwrap(), "jan@example.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = TokenCodec::new("test-secret", -5);
        let token = expired.issue("jan@example.com").unwrap();
        let err = codec().verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let other = TokenCodec::new("other-secret", 30);
        let token = other.issue("jan@example.com").unwrap();
        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(codec().verify("not-a-token").is_err());
    }
}
