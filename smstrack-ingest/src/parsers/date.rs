//! Lenient date parsing for exported SMS/expense CSVs.
//!
//! Slash dates are read month-first ("03/04/2024" is March 4) and only fall
//! back to day-first when month-first is impossible ("25/12/2024").

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use smstrack_core::DateCell;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a date cell. Anything unreadable becomes `DateCell::Unknown`.
pub fn parse_date(cell: &str) -> DateCell {
    let s = cell.trim();
    if s.is_empty() {
        return DateCell::Unknown;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return DateCell::Known(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return DateCell::Known(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return DateCell::Known(d.and_time(chrono::NaiveTime::MIN));
        }
    }

    DateCell::Unknown
}
