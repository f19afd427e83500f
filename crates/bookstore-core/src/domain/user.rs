//! User, Role and Auth Session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{normalize_key, Entity};
use crate::json;

/// Account role. Decides which pages the navigation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Customer,
    Admin,
    Librarian,
    DeliveryManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::Librarian => "librarian",
            Role::DeliveryManager => "delivery_manager",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match normalize_key(raw).as_str() {
            "admin" | "administrator" | "superadmin" => Role::Admin,
            "librarian" | "librarymanager" | "manager" => Role::Librarian,
            "deliverymanager" | "delivery" | "courier" | "driver" => Role::DeliveryManager,
            _ => Role::Customer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Admin => "Administrator",
            Role::Librarian => "Librarian",
            Role::DeliveryManager => "Delivery Manager",
        }
    }

    /// Catalog, borrow approvals, complaints and ads.
    pub fn can_manage_library(&self) -> bool {
        matches!(self, Role::Admin | Role::Librarian)
    }

    pub fn is_delivery_manager(&self) -> bool {
        matches!(self, Role::DeliveryManager)
    }
}

string_enum_serde!(Role);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct User {
    #[serde(default, deserialize_with = "json::string_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, deserialize_with = "json::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

json::lenient_keys!(User, serialize {
    id: ["userId", "user_id"],
    name: ["fullName", "full_name", "username"],
    phone: ["phoneNumber", "phone_number"],
    role: ["userType", "user_type"],
    avatar_url: ["avatar", "avatarUrl"],
    created_at: ["createdAt"],
});

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Token plus (when the backend includes it) the signed-in user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct AuthSession {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

json::lenient_keys!(AuthSession, serialize {
    token: ["accessToken", "access_token", "jwt"],
});

impl AuthSession {
    pub fn role(&self) -> Role {
        self.user.as_ref().map(|u| u.role).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_spellings() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("deliveryManager"), Role::DeliveryManager);
        assert_eq!(Role::parse("delivery_manager"), Role::DeliveryManager);
        assert_eq!(Role::parse("librarian"), Role::Librarian);
        assert_eq!(Role::parse("reader"), Role::Customer);
        assert!(Role::Librarian.can_manage_library());
        assert!(!Role::DeliveryManager.can_manage_library());
    }

    #[test]
    fn test_session_from_login_payload() {
        let session: AuthSession = serde_json::from_str(
            r#"{"access_token":"abc","user":{"id":5,"full_name":"Sam","email":"s@x.io","user_type":"admin"}}"#,
        )
        .unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.user.unwrap().id(), "5");
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::DeliveryManager).unwrap();
        assert_eq!(json, r#""delivery_manager""#);
    }

    #[test]
    fn test_both_spellings_keep_first() {
        let session: AuthSession = serde_json::from_str(
            r#"{"token": "abc", "access_token": "abc",
                "user": {"id": 5, "user_id": 5, "name": "Sam", "full_name": "Sam Lee",
                         "role": "librarian", "user_type": "librarian"}}"#,
        )
        .unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.role(), Role::Librarian);
        assert_eq!(session.user.as_ref().map(|u| u.name.as_str()), Some("Sam"));
    }
}
