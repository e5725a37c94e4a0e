//! Bounds of the representable instant range.
//!
//! Stored date-times use four-digit ISO years, so the range stops at the
//! end of year 9999.

use chrono::{DateTime, NaiveDate, Utc};

/// The earliest instant whose UTC year has four digits.
pub fn min_iso_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The latest instant whose UTC year has four digits.
pub fn max_iso_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_nano_opt(23, 59, 59, 999_999_999))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
