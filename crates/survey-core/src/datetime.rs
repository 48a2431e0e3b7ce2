//! Lenient submission-time parsing.
//!
//! Raw exports carry timestamps in whatever layout the collection tool
//! produced. Parsing tries full datetime formats first, then date-only
//! formats promoted to midnight. Anything unrecognized becomes null.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Render format for standardized submission times: exactly 19 characters,
/// `YYYY-MM-DD HH:MM:SS`. Downstream consumers index into this layout.
pub const SUBMIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a raw timestamp leniently and renders it fixed-width.
pub fn standardize_datetime(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_submit_time(trimmed).map(|dt| dt.format(SUBMIT_TIME_FORMAT).to_string())
}

/// Parses a timestamp from any of the accepted layouts.
pub fn parse_submit_time(value: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = try_parse_datetime(value) {
        return Some(dt);
    }
    try_parse_date(value).map(|date| date.and_time(NaiveTime::MIN))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    None
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y%m%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%b-%Y",
        "%d.%m.%Y",
    ];
    for fmt in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    None
}
