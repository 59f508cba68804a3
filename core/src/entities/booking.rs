//! Bookings of tour packages.

use serde::Serialize;

use super::Normalize;
use crate::date;
use crate::raw::{identifier, Field, Raw};

const ID: Field<String> = Field::new(&["id", "_id", "booking_id"]);
const CODE: Field<String> = Field::new(&["bookingCode", "booking_code", "kode_booking", "code"]);
pub(crate) const PACKAGE_ID: Field<String> = Field::new(&["packageId", "package_id", "paket_id"]);
pub(crate) const PACKAGE_NAME: Field<String> = Field::new(&["packageName", "package_name", "nama_paket"]);
pub(crate) const NESTED_ID: Field<String> = Field::new(&["id", "_id"]);
pub(crate) const NESTED_NAME: Field<String> = Field::new(&["name", "nama", "full_name", "nama_paket"]);
pub(crate) const PACKAGE_OBJECT: &[&str] = &["package", "paket"];
pub(crate) const CUSTOMER_NAME: Field<String> = Field::new(&["customerName", "customer_name", "nama_pemesan", "name"]);
const USER_OBJECT: &[&str] = &["user", "customer"];
const EMAIL: Field<String> = Field::new(&["email", "customer_email"]);
const PHONE: Field<String> = Field::new(&["phone", "no_hp", "telepon", "phone_number"]);
pub(crate) const PARTICIPANTS: Field<i64> = Field::new(&["participants", "jumlah_peserta", "pax", "jumlah_orang"]);
const TOTAL_PRICE: Field<f64> = Field::new(&["totalPrice", "total_price", "total_harga", "total"]);
pub(crate) const STATUS: Field<String> = Field::new(&["status", "booking_status"]);
const PAYMENT_STATUS: Field<String> = Field::new(&["paymentStatus", "payment_status", "status_pembayaran"]);
const PAYMENT_PROOF: Field<String> = Field::new(&["paymentProof", "payment_proof", "bukti_pembayaran"]);
pub(crate) const TRIP_DATE: Field<String> =
    Field::new(&["tripDate", "trip_date", "tanggal_keberangkatan", "departure_date"]);
const CREATED_AT: Field<String> = Field::new(&["createdAt", "created_at", "tanggal_pesan"]);
const NOTES: Field<String> = Field::new(&["notes", "catatan"]);

pub(crate) const UNKNOWN_PACKAGE: &str = "Paket Tidak Diketahui";
pub(crate) const GUEST: &str = "Tamu";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub booking_code: String,
    pub package_id: String,
    pub package_name: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub participants: i64,
    pub total_price: f64,
    pub status: String,
    pub payment_status: String,
    pub payment_proof: String,
    pub trip_date: String,
    pub display_trip_date: String,
    pub created_at: String,
    pub display_created_at: String,
    pub notes: String,
}

impl Normalize for Booking {
    fn normalize(raw: Raw<'_>) -> Self {
        let user = raw.nested_any(USER_OBJECT);
        let trip_date = TRIP_DATE.or_default(raw);
        let created_at = CREATED_AT.or_default(raw);
        Self {
            id: identifier(raw, &ID, "booking"),
            booking_code: CODE.or_default(raw),
            package_id: package_id(raw),
            package_name: package_name(raw, UNKNOWN_PACKAGE),
            customer_name: customer_name(raw),
            email: EMAIL.get(raw).or_else(|| EMAIL.get(user)).unwrap_or_default(),
            phone: PHONE.get(raw).or_else(|| PHONE.get(user)).unwrap_or_default(),
            participants: PARTICIPANTS.or_default(raw),
            total_price: TOTAL_PRICE.or_default(raw),
            status: STATUS.text_or(raw, "Pending"),
            payment_status: PAYMENT_STATUS.text_or(raw, "Belum Bayar"),
            payment_proof: PAYMENT_PROOF.or_default(raw),
            display_trip_date: date::display(&trip_date),
            trip_date,
            display_created_at: date::display(&created_at),
            created_at,
            notes: NOTES.or_default(raw),
        }
    }
}

/// Top-level package id, else the id of an embedded package object. A bare
/// scalar under `package` is also taken as the id.
pub(crate) fn package_id(raw: Raw<'_>) -> String {
    PACKAGE_ID
        .get(raw)
        .or_else(|| NESTED_ID.get(raw.nested_any(PACKAGE_OBJECT)))
        .or_else(|| Field::<String>::new(PACKAGE_OBJECT).get(raw))
        .unwrap_or_default()
}

pub(crate) fn package_name(raw: Raw<'_>, placeholder: &str) -> String {
    PACKAGE_NAME
        .get(raw)
        .or_else(|| NESTED_NAME.get(raw.nested_any(PACKAGE_OBJECT)))
        .unwrap_or_else(|| placeholder.to_string())
}

pub(crate) fn customer_name(raw: Raw<'_>) -> String {
    CUSTOMER_NAME
        .get(raw)
        .or_else(|| NESTED_NAME.get(raw.nested_any(USER_OBJECT)))
        .unwrap_or_else(|| GUEST.to_string())
}

/// Canonical payload for creating or editing a booking.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Admin status change for a booking.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}
