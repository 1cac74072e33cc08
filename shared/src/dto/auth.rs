//! # Authentication and User DTOs
//!
//! Users, roles and the request bodies for login, registration and profile edits.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Backend identifier of a user.
pub type UserId = i64;

/// Access role carried by every user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User information as mirrored by the client.
///
/// `points` is the user's exchange balance. It can never go negative on the
/// server, so it is modelled unsigned and a negative value fails decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Only present on `GET /user/profile`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<UserStats>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Per-user listing statistics returned with the profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub approved_items: u32,
    #[serde(default)]
    pub total_swaps: u32,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Profile fields a user may edit. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// `{ user }` payload of login, registration, `/auth/me` and the profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPayload {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_backend_shape() {
        let json = serde_json::json!({
            "id": 3,
            "email": "ana@example.com",
            "name": "Ana",
            "points": 50,
            "role": "admin",
            "avatar": null,
            "bio": null,
            "location": "Pune",
            "created_at": "2024-03-01T10:15:00.123456"
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.points, 50);
        assert_eq!(user.location.as_deref(), Some("Pune"));
        assert!(user.created_at.is_some());
        assert!(user.stats.is_none());
    }

    #[test]
    fn test_negative_points_are_rejected() {
        let json = serde_json::json!({
            "id": 3, "email": "a@b.co", "name": "A", "points": -1, "role": "user"
        });
        assert!(serde_json::from_value::<User>(json).is_err());
    }

    #[test]
    fn test_profile_update_omits_untouched_fields() {
        let update = ProfileUpdate {
            bio: Some("Vintage first".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "bio": "Vintage first" })
        );
    }
}
