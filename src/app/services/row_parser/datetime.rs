//! Timestamp parsing
//!
//! Tool output is already UTC-normalized unless a schema says otherwise, so
//! zone-less text is taken as UTC and never re-offset. Parsing never consults
//! the ambient locale.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::app::services::schema_registry::{DateFormat, DateStyle};
use crate::constants::{GENERAL_DATE_FORMATS, GENERAL_DATETIME_FORMATS, OFFSET_DATETIME_FORMATS};

/// Parse timestamp text according to a field's date options
///
/// Returns `None` for blank or unparseable text; callers decide whether that
/// is a null value or a row error.
pub fn parse_datetime(text: &str, format: &DateFormat, style: DateStyle) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match format {
        DateFormat::General => parse_general(text, style),
        DateFormat::Pattern(pattern) => parse_pattern(text, pattern, style),
        DateFormat::UnixSeconds => text
            .parse::<i64>()
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
    }
}

/// Zero value for non-nullable datetime fields (0001-01-01 00:00:00 UTC)
pub fn min_datetime() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_general(text: &str, style: DateStyle) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in GENERAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return apply_style(naive, style);
        }
    }

    for format in GENERAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).and_then(|n| apply_style(n, style));
        }
    }

    None
}

fn parse_pattern(text: &str, pattern: &str, style: DateStyle) -> Option<DateTime<Utc>> {
    if pattern.contains("%z") || pattern.contains("%:z") {
        return DateTime::parse_from_str(text, pattern)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return apply_style(naive, style);
    }

    // Date-only patterns
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| apply_style(naive, style))
}

fn apply_style(naive: NaiveDateTime, style: DateStyle) -> Option<DateTime<Utc>> {
    match style {
        DateStyle::AssumeUtc => Some(Utc.from_utc_datetime(&naive)),
        DateStyle::AssumeLocal => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc)),
    }
}
