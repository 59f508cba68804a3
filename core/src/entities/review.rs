//! Customer reviews of packages.

use serde::Serialize;

use super::booking::{package_id, package_name, NESTED_NAME};
use super::Normalize;
use crate::date;
use crate::raw::{identifier, Field, Raw};

const ID: Field<String> = Field::new(&["id", "_id", "review_id"]);
const USER_NAME: Field<String> = Field::new(&["userName", "user_name", "nama", "name"]);
const USER_AVATAR: Field<String> = Field::new(&["userAvatar", "user_avatar", "avatar"]);
const USER_OBJECT: &[&str] = &["user", "customer"];
const RATING: Field<f64> = Field::new(&["rating", "bintang", "stars"]);
const COMMENT: Field<String> = Field::new(&["comment", "komentar", "ulasan", "review", "content"]);
const PHOTO: Field<String> = Field::new(&["photo", "foto", "image"]);
const VISIBLE: Field<bool> = Field::new(&["isVisible", "is_visible", "visible", "is_approved"]);
const DATE: Field<String> = Field::new(&["createdAt", "created_at", "tanggal", "date"]);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    pub id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub package_id: String,
    pub package_name: String,
    /// Always within 0..=5.
    pub rating: f64,
    pub comment: String,
    pub photo: String,
    pub is_visible: bool,
    pub date: String,
    pub display_date: String,
}

impl Normalize for UserReview {
    fn normalize(raw: Raw<'_>) -> Self {
        let user = raw.nested_any(USER_OBJECT);
        let date = DATE.or_default(raw);
        Self {
            id: identifier(raw, &ID, "review"),
            user_name: USER_NAME
                .get(raw)
                .or_else(|| NESTED_NAME.get(user))
                .unwrap_or_else(|| "Anonim".to_string()),
            user_avatar: USER_AVATAR.get(raw).or_else(|| USER_AVATAR.get(user)).unwrap_or_default(),
            package_id: package_id(raw),
            package_name: package_name(raw, ""),
            rating: RATING.or_default(raw).clamp(0.0, 5.0),
            comment: COMMENT.or_default(raw),
            photo: PHOTO.or_default(raw),
            is_visible: VISIBLE.or(raw, true),
            display_date: date::display(&date),
            date,
        }
    }
}

/// Canonical payload for writing a review.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_user_and_package() {
        let review = UserReview::from_value(&json!({
            "id": 1,
            "user": {"full_name": "Dewi", "avatar": "d.png"},
            "paket": {"id": 3, "nama_paket": "Dieng"},
            "bintang": "4",
            "komentar": "Seru!",
            "created_at": "2025-06-01"
        }));
        assert_eq!(review.user_name, "Dewi");
        assert_eq!(review.user_avatar, "d.png");
        assert_eq!(review.package_id, "3");
        assert_eq!(review.package_name, "Dieng");
        assert_eq!(review.rating, 4.0);
        assert_eq!(review.comment, "Seru!");
        assert_eq!(review.display_date, "1 Juni 2025");
        assert!(review.is_visible);
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(UserReview::from_value(&json!({"rating": 9})).rating, 5.0);
        assert_eq!(UserReview::from_value(&json!({"rating": -1})).rating, 0.0);
    }

    #[test]
    fn anonymous_default() {
        let review = UserReview::from_value(&json!({"id": "r", "is_approved": 0}));
        assert_eq!(review.user_name, "Anonim");
        assert!(!review.is_visible);
        assert_eq!(review.package_name, "");
    }
}
