//! Timestamp parsing and display formatting.
//!
//! Readings are shown in Indian Standard Time. Malformed timestamps never
//! propagate as errors; they render as [`INVALID_DATE`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

pub const INVALID_DATE: &str = "Invalid date";
pub const UNKNOWN_DATE: &str = "Unknown";

/// Format used for API query parameters and date inputs.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse the timestamp shapes the backend produces: RFC 3339, RFC 2822,
/// naive ISO date-times (taken as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

fn format_with(raw: Option<&str>, pattern: &str) -> String {
    match raw {
        None => UNKNOWN_DATE.to_string(),
        Some(s) if s.trim().is_empty() => UNKNOWN_DATE.to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(dt) => dt.with_timezone(&ist()).format(pattern).to_string(),
            None => INVALID_DATE.to_string(),
        },
    }
}

/// Date and time, e.g. `19 Oct 2026, 02:30 PM`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_with(raw, "%d %b %Y, %I:%M %p")
}

/// Date only, e.g. `19 Oct 2026`.
pub fn format_date(raw: Option<&str>) -> String {
    format_with(raw, "%d %b %Y")
}

/// Hour-of-day axis label, e.g. `14:30`.
pub fn time_label(raw: Option<&str>) -> String {
    format_with(raw, "%H:%M")
}

/// Short axis label, e.g. `19 Oct`.
pub fn short_date_label(raw: Option<&str>) -> String {
    format_with(raw, "%d %b")
}

/// Weekday abbreviation, e.g. `Mon`.
pub fn weekday_label(raw: Option<&str>) -> String {
    format_with(raw, "%a")
}

/// Calendar date (IST) of a timestamp.
pub fn local_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.with_timezone(&ist()).date_naive())
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_invalid() {
        assert_eq!(format_timestamp(None), UNKNOWN_DATE);
        assert_eq!(format_timestamp(Some("")), UNKNOWN_DATE);
        assert_eq!(format_timestamp(Some("not a date")), INVALID_DATE);
        assert_eq!(format_date(Some("2024-13-45")), INVALID_DATE);
    }

    #[test]
    fn test_naive_timestamps_are_utc_shown_in_ist() {
        assert_eq!(
            format_timestamp(Some("2024-01-15T09:00:00")),
            "15 Jan 2024, 02:30 PM"
        );
        assert_eq!(time_label(Some("2024-01-15T09:00:00.123456")), "14:30");
    }

    #[test]
    fn test_rfc_formats() {
        assert_eq!(time_label(Some("2024-01-15T09:00:00+05:30")), "09:00");
        assert_eq!(
            format_date(Some("Mon, 15 Jan 2024 20:00:00 GMT")),
            "16 Jan 2024"
        );
    }

    #[test]
    fn test_bare_dates() {
        assert_eq!(format_date(Some("2024-03-01")), "01 Mar 2024");
        assert_eq!(short_date_label(Some("2024-03-01")), "01 Mar");
        assert_eq!(weekday_label(Some("2024-03-01")), "Fri");
        assert_eq!(
            local_date("2024-03-01T20:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
    }

    #[test]
    fn test_iso_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        assert_eq!(iso_date(date), "2023-06-15");
        assert_eq!(parse_iso_date("2023-06-15"), Some(date));
        assert_eq!(parse_iso_date("15/06/2023"), None);
    }
}
