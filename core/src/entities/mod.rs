//! Canonical entities and their normalizers.
//!
//! # Design
//! Every entity is built from a raw record through a table of [`Field`]
//! rules declared at the top of its module. The tables are the contract:
//! the order of candidate keys is the precedence between backend synonyms.
//! Entities serialize with camelCase keys so the UI sees one stable shape.
//!
//! Each module also holds the canonical input payload for its write
//! operations; the [`encode`](crate::encode) tables translate those names
//! to whatever the endpoint expects.
//!
//! [`Field`]: crate::raw::Field

pub mod article;
pub mod booking;
pub mod dashboard;
pub mod package;
pub mod review;
pub mod user;
pub mod wishlist;

use serde_json::Value;

use crate::raw::Raw;

pub use article::{Article, ArticleInput, ContentBlock};
pub use booking::{Booking, BookingInput, BookingStatusInput};
pub use dashboard::{BookingStatusBreakdown, Buyer, DashboardStats, PackageStat, TripRow};
pub use package::{ItineraryDay, PackageDetail, PackageInput};
pub use review::{ReviewInput, UserReview};
pub use user::{AdminUser, Credentials, ProfileInput, RegisterInput, User, UserInput};
pub use wishlist::{WishlistInput, WishlistItem};

/// Total conversion from a raw record into a canonical entity.
pub trait Normalize: Sized {
    fn normalize(raw: Raw<'_>) -> Self;

    fn from_value(value: &Value) -> Self {
        Self::normalize(Raw::new(value))
    }
}

/// Normalizes every record of a resolved list.
pub fn normalize_list<T: Normalize>(records: &[Value]) -> Vec<T> {
    records.iter().map(T::from_value).collect()
}

/// Maps each element of the array under the first matching key, passing the
/// zero-based position so missing labels can be synthesized.
pub(crate) fn normalize_indexed<T>(raw: Raw<'_>, keys: &[&str], build: impl Fn(&Value, usize) -> T) -> Vec<T> {
    raw.first(keys)
        .and_then(Value::as_array)
        .map(|items| items.iter().enumerate().map(|(index, item)| build(item, index)).collect())
        .unwrap_or_default()
}
