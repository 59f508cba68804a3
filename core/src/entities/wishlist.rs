//! Saved packages.
//!
//! Wishlist rows either flatten the package fields or embed the whole
//! package object; package fields are looked up at the top level first.

use serde::Serialize;

use super::booking::{package_id, package_name, PACKAGE_OBJECT};
use super::package::{DURATION, IMAGE, LOCATION, PLACEHOLDER_NAME, PRICE};
use super::Normalize;
use crate::date;
use crate::raw::{identifier, Coerce, Field, Raw};

const ID: Field<String> = Field::new(&["id", "_id", "wishlist_id"]);
const ADDED_AT: Field<String> = Field::new(&["addedAt", "added_at", "created_at", "createdAt"]);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub package_id: String,
    pub package_name: String,
    pub image: String,
    pub price: f64,
    pub location: String,
    pub duration: String,
    pub added_at: String,
    pub display_added_at: String,
}

impl Normalize for WishlistItem {
    fn normalize(raw: Raw<'_>) -> Self {
        let package = raw.nested_any(PACKAGE_OBJECT);
        let added_at = ADDED_AT.or_default(raw);
        Self {
            id: identifier(raw, &ID, "wishlist item"),
            package_id: package_id(raw),
            package_name: package_name(raw, PLACEHOLDER_NAME),
            image: flat_or_nested(&IMAGE, raw, package),
            price: flat_or_nested(&PRICE, raw, package),
            location: flat_or_nested(&LOCATION, raw, package),
            duration: flat_or_nested(&DURATION, raw, package),
            display_added_at: date::display(&added_at),
            added_at,
        }
    }
}

fn flat_or_nested<T: Coerce + Default>(field: &Field<T>, raw: Raw<'_>, package: Raw<'_>) -> T {
    field.get(raw).or_else(|| field.get(package)).unwrap_or_default()
}

/// Payload for adding a package to the wishlist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistInput {
    pub package_id: String,
}
