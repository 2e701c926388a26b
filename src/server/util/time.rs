//! Date and time parsing for uploaded spreadsheet cells.
//!
//! Spreadsheets arrive with issue times written in many ways: ISO timestamps, slash or dot
//! separated dates, Chinese date notation, or raw Excel serial numbers. These helpers turn
//! any of those into a naive UTC timestamp, returning `None` when nothing matches so callers
//! can fall back to the ingestion time.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Date-time formats tried in order before falling back to date-only formats.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y年%m月%d日 %H:%M:%S",
    "%Y年%m月%d日 %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats, interpreted as midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d", "%Y年%m月%d日", "%m/%d/%Y", "%d.%m.%Y",
];

/// Day zero of the Excel 1900 date system, accounting for the phantom 1900-02-29.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial accepted as a date (9999-12-31).
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Parses a textual date or date-time.
///
/// Surrounding whitespace is ignored. Numeric text is treated as an Excel serial date, which
/// is how date cells look once a spreadsheet has been exported to CSV.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(datetime) = chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
    {
        return Some(datetime);
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    value.parse::<f64>().ok().and_then(excel_serial_to_datetime)
}

/// Converts an Excel serial date (days since 1899-12-30, fractional part = time of day).
///
/// Returns `None` for non-finite, non-positive, or out of range serials.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= 0.0 || serial > EXCEL_MAX_SERIAL {
        return None;
    }

    let (year, month, day) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;

    let millis = (serial * 86_400_000.0).round() as i64;

    epoch.checked_add_signed(Duration::milliseconds(millis))
}
