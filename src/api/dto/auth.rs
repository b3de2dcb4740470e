//! DTOs for registration, login and the current-user endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Client;
use crate::domain::identity::AuthUser;

/// Self-service registration payload. The role is always `user`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Bearer token response; field names follow the OAuth2 convention.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user,
        }
    }
}

/// Public view of an account; the password hash never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub role: String,
    pub registration_date: DateTime<Utc>,
    pub active_rentals_count: i32,
}

impl From<Client> for UserResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
            address: client.address,
            phone: client.phone,
            role: client.role.as_str().to_string(),
            registration_date: client.registration_date,
            active_rentals_count: client.active_rentals_count,
        }
    }
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            address: user.address,
            phone: user.phone,
            role: user.role.as_str().to_string(),
            registration_date: user.registration_date,
            active_rentals_count: user.active_rentals_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"jan@example.com","password":"s3cret!"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());
        assert!(valid.address.is_empty());

        let bad_email: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"nope","password":"s3cret!"}"#,
        )
        .unwrap();
        assert!(bad_email.validate().is_err());

        let short_password: RegisterRequest = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"jan@example.com","password":"x"}"#,
        )
        .unwrap();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_user_response_is_camel_case() {
        let user = UserResponse {
            id: 1,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: "jan@example.com".to_string(),
            address: String::new(),
            phone: String::new(),
            role: "user".to_string(),
            registration_date: Utc::now(),
            active_rentals_count: 0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("activeRentalsCount").is_some());
        assert!(json.get("first_name").is_none());
    }
}
