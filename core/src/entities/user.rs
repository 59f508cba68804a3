//! People: the signed-in identity and the admin view of accounts.

use serde::{Deserialize, Serialize};

use super::Normalize;
use crate::date;
use crate::raw::{identifier, Field, Raw};

const ID: Field<String> = Field::new(&["id", "_id", "user_id"]);
const NAME: Field<String> = Field::new(&["name", "full_name", "nama", "username"]);
const EMAIL: Field<String> = Field::new(&["email"]);
const PHONE: Field<String> = Field::new(&["phone", "no_hp", "telepon", "phone_number"]);
const ROLE: Field<String> = Field::new(&["role", "peran"]);
const ACTIVE: Field<bool> = Field::new(&["isActive", "is_active", "active", "status"]);
const AVATAR: Field<String> = Field::new(&["avatar", "avatar_url", "photo", "foto"]);
const TOTAL_BOOKINGS: Field<i64> = Field::new(&["total_bookings", "totalBookings", "booking_count"]);
const JOINED_AT: Field<String> = Field::new(&["joinedAt", "date_joined", "created_at", "createdAt", "tanggal_daftar"]);

const PLACEHOLDER_NAME: &str = "Pengguna";
const DEFAULT_ROLE: &str = "user";

/// The authenticated identity kept in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub avatar: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

impl Normalize for User {
    fn normalize(raw: Raw<'_>) -> Self {
        Self {
            id: identifier(raw, &ID, "user"),
            name: NAME.text_or(raw, PLACEHOLDER_NAME),
            email: EMAIL.or_default(raw),
            phone: PHONE.or_default(raw),
            role: ROLE.text_or(raw, DEFAULT_ROLE),
            avatar: AVATAR.or_default(raw),
        }
    }
}

/// An account as listed in the admin user table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub avatar: String,
    pub total_bookings: i64,
    pub joined_at: String,
    pub display_joined_at: String,
}

impl Normalize for AdminUser {
    fn normalize(raw: Raw<'_>) -> Self {
        let joined_at = JOINED_AT.or_default(raw);
        Self {
            id: identifier(raw, &ID, "user"),
            name: NAME.text_or(raw, PLACEHOLDER_NAME),
            email: EMAIL.or_default(raw),
            phone: PHONE.or_default(raw),
            role: ROLE.text_or(raw, DEFAULT_ROLE),
            is_active: ACTIVE.or(raw, true),
            avatar: AVATAR.or_default(raw),
            total_bookings: TOTAL_BOOKINGS.or_default(raw),
            display_joined_at: date::display(&joined_at),
            joined_at,
        }
    }
}

/// Login credentials; sent as-is.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Admin create/update of an account.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Self-service profile edit.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identity_from_backend_profile() {
        let user = User::from_value(&json!({
            "id": 7,
            "full_name": "Made",
            "email": "made@example.com",
            "no_hp": "0813",
            "role": "Admin"
        }));
        assert_eq!(user.id, "7");
        assert_eq!(user.name, "Made");
        assert_eq!(user.phone, "0813");
        assert!(user.is_admin());
    }

    #[test]
    fn admin_user_defaults_and_dates() {
        let user = AdminUser::from_value(&json!({
            "id": "u",
            "username": "wayan",
            "date_joined": "2024-11-30T12:00:00Z"
        }));
        assert_eq!(user.name, "wayan");
        assert_eq!(user.role, "user");
        assert!(user.is_active);
        assert_eq!(user.display_joined_at, "30 November 2024");
    }

    #[test]
    fn status_word_controls_activity() {
        let user = AdminUser::from_value(&json!({"id": 1, "status": "inactive"}));
        assert!(!user.is_active);
    }

    #[test]
    fn user_round_trips_for_persistence() {
        let user = User::from_value(&json!({"id": 1, "name": "Ayu"}));
        let stored = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, user);
    }
}
