//! Tour packages.

use serde::Serialize;
use serde_json::Value;

use super::{normalize_indexed, Normalize};
use crate::date;
use crate::raw::{identifier, Field, Raw};

pub(crate) const ID: Field<String> = Field::new(&["id", "_id", "package_id", "paket_id"]);
pub(crate) const NAME: Field<String> = Field::new(&["name", "nama", "nama_paket", "title"]);
const SLUG: Field<String> = Field::new(&["slug"]);
const DESCRIPTION: Field<String> = Field::new(&["description", "deskripsi"]);
pub(crate) const LOCATION: Field<String> = Field::new(&["location", "lokasi", "destination", "destinasi"]);
pub(crate) const PRICE: Field<f64> = Field::new(&["price", "harga"]);
pub(crate) const DURATION: Field<String> = Field::new(&["duration", "durasi"]);
const QUOTA: Field<i64> = Field::new(&["quota", "kuota", "max_participants"]);
pub(crate) const IMAGE: Field<String> = Field::new(&["image", "imageUrl", "image_url", "gambar", "thumbnail"]);
const GALLERY: &[&str] = &["gallery", "galeri", "images"];
const GALLERY_URL: Field<String> = Field::new(&["url", "image", "image_url", "gambar"]);
const INCLUDES: Field<Vec<String>> = Field::new(&["includes", "include", "fasilitas", "facilities"]);
const EXCLUDES: Field<Vec<String>> = Field::new(&["excludes", "exclude", "tidak_termasuk"]);
const ITINERARY: &[&str] = &["itinerary", "itineraries", "jadwal"];
const RATING: Field<f64> = Field::new(&["rating", "average_rating", "rata_rata_rating"]);
const REVIEW_COUNT: Field<i64> = Field::new(&["reviewCount", "review_count", "jumlah_ulasan", "total_reviews"]);
const CATEGORY: Field<String> = Field::new(&["category", "kategori", "type"]);
const ACTIVE: Field<bool> = Field::new(&["isActive", "is_active", "active", "status"]);
const CREATED_AT: Field<String> = Field::new(&["createdAt", "created_at"]);

const DAY_LABEL: &[&str] = &["day", "hari", "label"];
const DAY_TITLE: Field<String> = Field::new(&["title", "judul"]);
const DAY_DESCRIPTION: Field<String> = Field::new(&["description", "deskripsi"]);
const DAY_ACTIVITIES: Field<Vec<String>> = Field::new(&["activities", "kegiatan"]);

pub(crate) const PLACEHOLDER_NAME: &str = "Paket Tanpa Nama";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub duration: String,
    pub quota: i64,
    pub image: String,
    pub gallery: Vec<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub itinerary: Vec<ItineraryDay>,
    pub rating: f64,
    pub review_count: i64,
    pub category: String,
    pub is_active: bool,
    pub created_at: String,
    pub display_created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    /// "Hari 1", "Hari 2", ... unless the backend labels the day itself.
    pub day: String,
    pub title: String,
    pub description: String,
    pub activities: Vec<String>,
}

impl Normalize for PackageDetail {
    fn normalize(raw: Raw<'_>) -> Self {
        let created_at = CREATED_AT.or_default(raw);
        Self {
            id: identifier(raw, &ID, "package"),
            name: NAME.text_or(raw, PLACEHOLDER_NAME),
            slug: SLUG.or_default(raw),
            description: DESCRIPTION.or_default(raw),
            location: LOCATION.or_default(raw),
            price: PRICE.or_default(raw),
            duration: DURATION.or_default(raw),
            quota: QUOTA.or_default(raw),
            image: IMAGE.or_default(raw),
            gallery: gallery(raw),
            includes: INCLUDES.or_default(raw),
            excludes: EXCLUDES.or_default(raw),
            itinerary: normalize_indexed(raw, ITINERARY, itinerary_day),
            rating: RATING.or_default(raw),
            review_count: REVIEW_COUNT.or_default(raw),
            category: CATEGORY.or_default(raw),
            is_active: ACTIVE.or(raw, true),
            display_created_at: date::display(&created_at),
            created_at,
        }
    }
}

/// Gallery entries are plain URLs or image objects; a lone string is a
/// one-image gallery.
fn gallery(raw: Raw<'_>) -> Vec<String> {
    match raw.first(GALLERY) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(url) => Some(url.clone()),
                Value::Object(_) => GALLERY_URL.get(Raw::new(item)),
                _ => None,
            })
            .collect(),
        Some(Value::String(url)) if !url.trim().is_empty() => vec![url.clone()],
        _ => Vec::new(),
    }
}

fn itinerary_day(item: &Value, index: usize) -> ItineraryDay {
    let raw = Raw::new(item);
    let day = match raw.first(DAY_LABEL) {
        Some(Value::Number(n)) => format!("Hari {n}"),
        Some(Value::String(label)) if label.trim().parse::<u32>().is_ok() => format!("Hari {}", label.trim()),
        Some(Value::String(label)) if !label.trim().is_empty() => label.clone(),
        _ => format!("Hari {}", index + 1),
    };
    ItineraryDay {
        day,
        title: DAY_TITLE.or_default(raw),
        description: DAY_DESCRIPTION.or_default(raw),
        activities: DAY_ACTIVITIES.or_default(raw),
    }
}

/// Canonical payload for creating or updating a package.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
