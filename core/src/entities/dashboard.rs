//! Admin dashboard widgets.
//!
//! The dashboard is assembled from several endpoints. Each widget has its
//! own normalizer so a partial refresh can replace one widget at a time;
//! [`DashboardStats`] also accepts a single payload that embeds everything.

use serde::Serialize;
use serde_json::Value;

use super::booking::{customer_name, package_name, PARTICIPANTS, STATUS, TRIP_DATE};
use super::{normalize_list, Normalize};
use crate::date;
use crate::envelope;
use crate::raw::{identifier, Field, Raw};

const TOTAL_BOOKINGS: Field<i64> = Field::new(&["total_bookings", "totalBookings", "total_pemesanan"]);
const TOTAL_REVENUE: Field<f64> = Field::new(&["total_revenue", "totalRevenue", "total_pendapatan"]);
const TOTAL_PACKAGES: Field<i64> = Field::new(&["total_packages", "totalPackages", "total_paket"]);
const TOTAL_USERS: Field<i64> = Field::new(&["total_users", "totalUsers", "total_pengguna"]);
const PENDING_BOOKINGS: Field<i64> = Field::new(&["pending_bookings", "pendingBookings"]);
const POPULAR_PACKAGES: &[&str] = &["popular_packages", "popularPackages"];
const RECENT_BUYERS: &[&str] = &["recent_buyers", "recentBuyers"];
const STATUS_BREAKDOWN: &[&str] = &["booking_status", "status_breakdown", "bookingStatus"];
const UPCOMING_TRIPS: &[&str] = &["upcoming_trips", "upcomingTrips", "trips"];

const ID: Field<String> = Field::new(&["id", "_id", "package_id", "user_id", "booking_id"]);
const STAT_NAME: Field<String> = Field::new(&["name", "nama", "package_name", "nama_paket"]);
const STAT_BOOKINGS: Field<i64> = Field::new(&["bookings", "total_bookings", "booking_count", "jumlah_pemesanan"]);
const STAT_REVENUE: Field<f64> = Field::new(&["revenue", "total_revenue", "pendapatan"]);

const BUYER_NAME: Field<String> = Field::new(&["name", "full_name", "nama", "customer_name"]);
const BUYER_EMAIL: Field<String> = Field::new(&["email"]);
const BUYER_SPENT: Field<f64> = Field::new(&["total_spent", "totalSpent", "total_belanja"]);
const BUYER_BOOKINGS: Field<i64> = Field::new(&["booking_count", "bookingCount", "total_bookings"]);
const BUYER_LAST_BOOKING: Field<String> = Field::new(&["last_booking_date", "lastBookingDate", "last_booking"]);

const PENDING: Field<i64> = Field::new(&["pending", "menunggu"]);
const CONFIRMED: Field<i64> = Field::new(&["confirmed", "dikonfirmasi"]);
const COMPLETED: Field<i64> = Field::new(&["completed", "selesai"]);
const CANCELLED: Field<i64> = Field::new(&["cancelled", "canceled", "dibatalkan"]);
const ROW_STATUS: Field<String> = Field::new(&["status", "label"]);
const ROW_COUNT: Field<i64> = Field::new(&["count", "total", "jumlah"]);

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub total_packages: i64,
    pub total_users: i64,
    pub pending_bookings: i64,
    pub popular_packages: Vec<PackageStat>,
    pub recent_buyers: Vec<Buyer>,
    pub status_breakdown: BookingStatusBreakdown,
    pub upcoming_trips: Vec<TripRow>,
}

impl DashboardStats {
    /// Copies the headline totals from `other`, leaving widgets alone.
    pub fn with_totals_from(mut self, other: &DashboardStats) -> Self {
        self.total_bookings = other.total_bookings;
        self.total_revenue = other.total_revenue;
        self.total_packages = other.total_packages;
        self.total_users = other.total_users;
        self.pending_bookings = other.pending_bookings;
        self
    }
}

impl Normalize for DashboardStats {
    fn normalize(raw: Raw<'_>) -> Self {
        Self {
            total_bookings: TOTAL_BOOKINGS.or_default(raw),
            total_revenue: TOTAL_REVENUE.or_default(raw),
            total_packages: TOTAL_PACKAGES.or_default(raw),
            total_users: TOTAL_USERS.or_default(raw),
            pending_bookings: PENDING_BOOKINGS.or_default(raw),
            popular_packages: embedded_list(raw, POPULAR_PACKAGES),
            recent_buyers: embedded_list(raw, RECENT_BUYERS),
            status_breakdown: raw
                .first(STATUS_BREAKDOWN)
                .map(BookingStatusBreakdown::from_value)
                .unwrap_or_default(),
            upcoming_trips: embedded_list(raw, UPCOMING_TRIPS),
        }
    }
}

fn embedded_list<T: Normalize>(raw: Raw<'_>, keys: &[&str]) -> Vec<T> {
    raw.first(keys)
        .map(|value| normalize_list(envelope::records(value)))
        .unwrap_or_default()
}

/// Sales figures for one package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStat {
    pub id: String,
    pub name: String,
    pub bookings: i64,
    pub revenue: f64,
}

impl Normalize for PackageStat {
    fn normalize(raw: Raw<'_>) -> Self {
        Self {
            id: identifier(raw, &ID, "package stat"),
            name: STAT_NAME.text_or(raw, super::package::PLACEHOLDER_NAME),
            bookings: STAT_BOOKINGS.or_default(raw),
            revenue: STAT_REVENUE.or_default(raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub total_spent: f64,
    pub booking_count: i64,
    pub last_booking_date: String,
    pub display_last_booking_date: String,
}

impl Normalize for Buyer {
    fn normalize(raw: Raw<'_>) -> Self {
        let last_booking_date = BUYER_LAST_BOOKING.or_default(raw);
        Self {
            id: identifier(raw, &ID, "buyer"),
            name: BUYER_NAME.text_or(raw, super::booking::GUEST),
            email: BUYER_EMAIL.or_default(raw),
            total_spent: BUYER_SPENT.or_default(raw),
            booking_count: BUYER_BOOKINGS.or_default(raw),
            display_last_booking_date: date::display(&last_booking_date),
            last_booking_date,
        }
    }
}

/// Booking counts per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusBreakdown {
    pub pending: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl BookingStatusBreakdown {
    pub fn total(&self) -> i64 {
        [self.confirmed, self.completed, self.cancelled]
            .into_iter()
            .fold(self.pending, i64::saturating_add)
    }

    fn add(&mut self, status: &str, count: i64) {
        let slot = match status.trim().to_lowercase().as_str() {
            "pending" | "menunggu" => &mut self.pending,
            "confirmed" | "dikonfirmasi" => &mut self.confirmed,
            "completed" | "selesai" => &mut self.completed,
            "cancelled" | "canceled" | "dibatalkan" => &mut self.cancelled,
            _ => return,
        };
        *slot = slot.saturating_add(count);
    }
}

impl Normalize for BookingStatusBreakdown {
    /// Accepts `{pending: n, ...}` or a list of `{status, count}` rows.
    fn normalize(raw: Raw<'_>) -> Self {
        Self {
            pending: PENDING.or_default(raw),
            confirmed: CONFIRMED.or_default(raw),
            completed: COMPLETED.or_default(raw),
            cancelled: CANCELLED.or_default(raw),
        }
    }

    fn from_value(value: &Value) -> Self {
        let rows = envelope::records(value);
        if rows.is_empty() {
            return Self::normalize(Raw::new(value));
        }
        let mut breakdown = Self::default();
        for row in rows {
            let row = Raw::new(row);
            if let Some(status) = ROW_STATUS.get(row) {
                breakdown.add(&status, ROW_COUNT.or_default(row));
            }
        }
        breakdown
    }
}

/// One upcoming trip in the dashboard table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRow {
    pub id: String,
    pub package_name: String,
    pub customer_name: String,
    pub trip_date: String,
    pub display_trip_date: String,
    pub participants: i64,
    pub status: String,
}

impl Normalize for TripRow {
    fn normalize(raw: Raw<'_>) -> Self {
        let trip_date = TRIP_DATE.or_default(raw);
        Self {
            id: identifier(raw, &ID, "trip"),
            package_name: package_name(raw, super::booking::UNKNOWN_PACKAGE),
            customer_name: customer_name(raw),
            display_trip_date: date::display(&trip_date),
            trip_date,
            participants: PARTICIPANTS.or_default(raw),
            status: STATUS.text_or(raw, "Pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn summary_totals_accept_synonyms() {
        let stats = DashboardStats::from_value(&json!({
            "totalBookings": "12",
            "total_pendapatan": 9_000_000,
            "total_paket": 4,
            "total_users": 30,
            "pending_bookings": 2
        }));
        assert_eq!(stats.total_bookings, 12);
        assert_eq!(stats.total_revenue, 9_000_000.0);
        assert_eq!(stats.total_packages, 4);
        assert_eq!(stats.total_users, 30);
        assert_eq!(stats.pending_bookings, 2);
        assert!(stats.popular_packages.is_empty());
    }

    #[test]
    fn embedded_widgets_are_normalized() {
        let stats = DashboardStats::from_value(&json!({
            "popular_packages": {"results": [{"id": 1, "nama_paket": "Bali", "jumlah_pemesanan": 8}]},
            "recentBuyers": [{"id": "u1", "full_name": "Andi", "total_belanja": "750000"}],
            "booking_status": {"menunggu": 1, "selesai": 5},
            "trips": [{"id": 4, "package": {"nama": "Toba"}, "tanggal_keberangkatan": "2026-01-10"}]
        }));
        assert_eq!(stats.popular_packages[0].name, "Bali");
        assert_eq!(stats.popular_packages[0].bookings, 8);
        assert_eq!(stats.recent_buyers[0].name, "Andi");
        assert_eq!(stats.recent_buyers[0].total_spent, 750_000.0);
        assert_eq!(stats.status_breakdown.pending, 1);
        assert_eq!(stats.status_breakdown.completed, 5);
        assert_eq!(stats.upcoming_trips[0].package_name, "Toba");
        assert_eq!(stats.upcoming_trips[0].display_trip_date, "10 Januari 2026");
    }

    #[test]
    fn breakdown_from_rows() {
        let breakdown = BookingStatusBreakdown::from_value(&json!([
            {"status": "Pending", "count": 3},
            {"status": "dikonfirmasi", "jumlah": "2"},
            {"status": "Canceled", "total": 1},
            {"status": "unknown", "count": 9},
            {"count": 4}
        ]));
        assert_eq!(
            breakdown,
            BookingStatusBreakdown {
                pending: 3,
                confirmed: 2,
                completed: 0,
                cancelled: 1
            }
        );
        assert_eq!(breakdown.total(), 6);
    }

    #[test]
    fn huge_row_counts_saturate() {
        let stats = DashboardStats::from_value(&json!({
            "booking_status": [
                {"status": "pending", "count": i64::MAX},
                {"status": "menunggu", "count": 1},
                {"status": "selesai", "count": 5}
            ]
        }));
        assert_eq!(stats.status_breakdown.pending, i64::MAX);
        assert_eq!(stats.status_breakdown.completed, 5);
        assert_eq!(stats.status_breakdown.total(), i64::MAX);
    }

    #[test]
    fn totals_merge_keeps_widgets() {
        let prior = DashboardStats {
            popular_packages: vec![PackageStat {
                id: "p".into(),
                name: "Lama".into(),
                bookings: 1,
                revenue: 0.0,
            }],
            ..Default::default()
        };
        let fresh = DashboardStats {
            total_bookings: 10,
            ..Default::default()
        };
        let merged = prior.clone().with_totals_from(&fresh);
        assert_eq!(merged.total_bookings, 10);
        assert_eq!(merged.popular_packages, prior.popular_packages);
    }
}
