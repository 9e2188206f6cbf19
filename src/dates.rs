//! Date parsing and display helpers.
//!
//! The API hands out ISO timestamps (`2025-05-10T00:00:00.000Z`) while forms
//! carry plain days (`2025-05-10`); both reduce to a calendar day in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const DAY_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// `YYYY-MM-DD` for form fields; empty when absent or unreadable.
pub fn form_day(raw: Option<&str>) -> String {
    raw.and_then(parse_day)
        .map(|d| d.format(DAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD` for table cells; `-` when absent.
pub fn display_day(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_day(s)
            .map(|d| d.format(DAY_FORMAT).to_string())
            .unwrap_or_else(|| s.to_string()),
        None => "-".to_string(),
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC; the raw text when it does not parse.
pub fn display_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None if raw.trim().is_empty() => "-".to_string(),
        None => raw.to_string(),
    }
}
