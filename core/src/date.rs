//! Indonesian display dates.
//!
//! Entities keep the backend's date string untouched and carry a separate
//! display copy produced here, e.g. `2025-12-20` → `20 Desember 2025`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parses the date part of any format the backend is known to send.
pub fn parse(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok().map(|stamp| stamp.date()))
        .or_else(|| DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(raw, format).ok()))
}

/// "day month year" in Indonesian. Empty input stays empty; input that
/// cannot be parsed is returned as-is.
pub fn display(raw: &str) -> String {
    match parse(raw) {
        Some(date) => format_date(date),
        None => raw.trim().to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}
