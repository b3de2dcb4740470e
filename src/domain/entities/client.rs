//! Client entity: an account that can rent movies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role controlling access to admin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A registered client account.
///
/// `active_rentals_count` mirrors the number of rentals in `active` status
/// for this client and is adjusted on every rent/approve transition.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone: String,
    pub role: Role,
    pub registration_date: DateTime<Utc>,
    pub active_rentals_count: i32,
}

impl Client {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Display name used in rental listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input data for creating a new client account.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone: String,
    pub role: Role,
}

/// Partial update for an existing client. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_full_name() {
        let client = Client {
            id: 1,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: "jan@example.com".to_string(),
            password_hash: String::new(),
            address: String::new(),
            phone: String::new(),
            role: Role::User,
            registration_date: Utc::now(),
            active_rentals_count: 0,
        };
        assert_eq!(client.full_name(), "Jan Kowalski");
        assert!(!client.is_admin());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ClientPatch::default().is_empty());
        let patch = ClientPatch {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
