//! DTOs for profile updates and admin client management.

use serde::Deserialize;
use validator::Validate;

/// Self-service profile update. Changing the password requires the current
/// password alongside the new one.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: Option<String>,

    pub current_password: Option<String>,
}

/// Admin-side client creation; unlike registration, the role is explicit.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreateRequest {
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

    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

/// Admin-side partial client update.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_role_to_user() {
        let request: ClientCreateRequest = serde_json::from_str(
            r#"{"firstName":"Anna","lastName":"Nowak","email":"anna@example.com","password":"s3cret!"}"#,
        )
        .unwrap();
        assert_eq!(request.role, "user");
    }

    #[test]
    fn test_short_new_password_fails_validation() {
        let request = ProfileUpdateRequest {
            new_password: Some("x".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
