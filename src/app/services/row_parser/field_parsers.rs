//! Field conversion utilities for tool output rows
//!
//! This module provides helper functions for turning raw column text into
//! typed values: numerics, time spans, hex flag masks and enum
//! codes. Conversions are invariant-culture and never panic.

use chrono::TimeDelta;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::app::models::FieldValue;
use crate::app::services::schema_registry::{Decoding, FieldType};

/// .NET style time span: `[-][d.]hh:mm:ss[.fffffff]`
static TIMESPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?(?:(\d+)\.)?(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d{1,7}))?$")
        .unwrap_or_else(|e| panic!("invalid time span pattern: {}", e))
});

/// Zero value used when an optional, non-nullable field is absent
pub fn zero_value(field_type: FieldType, nullable: bool) -> FieldValue {
    if nullable {
        return FieldValue::Null;
    }

    match field_type {
        FieldType::String => FieldValue::Text(String::new()),
        FieldType::Int => FieldValue::Int(0),
        FieldType::Long => FieldValue::Long(0),
        FieldType::UnsignedLong => FieldValue::UnsignedLong(0),
        FieldType::Float => FieldValue::Float(0.0),
        FieldType::Bool => FieldValue::Bool(false),
        FieldType::DateTime => FieldValue::DateTime(super::datetime::min_datetime()),
        FieldType::NullableDateTime => FieldValue::Null,
        FieldType::TimeSpan => FieldValue::TimeSpan(TimeDelta::zero()),
    }
}

/// Parse numeric text for one of the numeric field types
///
/// Returns `None` when the text does not parse as the requested type.
pub fn parse_numeric(text: &str, field_type: FieldType) -> Option<FieldValue> {
    let text = text.trim();
    match field_type {
        FieldType::Int => text.parse::<i32>().ok().map(FieldValue::Int),
        FieldType::Long => text.parse::<i64>().ok().map(FieldValue::Long),
        FieldType::UnsignedLong => text.parse::<u64>().ok().map(FieldValue::UnsignedLong),
        FieldType::Float => text.parse::<f64>().ok().map(FieldValue::Float),
        _ => None,
    }
}

/// Parse a .NET style time span
pub fn parse_timespan(text: &str) -> Option<TimeDelta> {
    let captures = TIMESPAN_PATTERN.captures(text.trim())?;

    let number = |index: usize| -> Option<i64> {
        captures
            .get(index)
            .map(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(Some(0))
    };

    let days = number(2)?;
    let hours = number(3)?;
    let minutes = number(4)?;
    let seconds = number(5)?;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    // Fraction is left-aligned: ".5" is half a second
    let nanos = match captures.get(6) {
        Some(fraction) => {
            let digits = format!("{:0<9}", fraction.as_str());
            digits.parse::<i64>().ok()?
        }
        None => 0,
    };

    let total_seconds = days
        .checked_mul(86_400)?
        .checked_add(hours * 3_600 + minutes * 60 + seconds)?;
    let span = TimeDelta::try_seconds(total_seconds)?
        .checked_add(&TimeDelta::nanoseconds(nanos))?;

    if captures.get(1).is_some() {
        Some(-span)
    } else {
        Some(span)
    }
}

/// Apply a text decoding table
pub fn decode(text: &str, decoding: Decoding) -> String {
    match decoding {
        Decoding::HexFlags(table) => decode_hex_flags(text, table),
        Decoding::Enum(table) => decode_enum(text, table),
    }
}

/// Render a hexadecimal mask as pipe-joined flag names
///
/// An optional `0x` prefix is stripped. Text that is not valid hex yields
/// an empty string; the failure is only reported as a diagnostic.
pub fn decode_hex_flags(text: &str, table: &[(u64, &str)]) -> String {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bits = match u64::from_str_radix(digits, 16) {
        Ok(bits) => bits,
        Err(e) => {
            debug!("Unparseable hex flags '{}': {}", trimmed, e);
            return String::new();
        }
    };

    let names: Vec<&str> = table
        .iter()
        .filter(|(flag, _)| *flag != 0 && bits & flag == *flag)
        .map(|(_, name)| *name)
        .collect();

    let known = table.iter().fold(0u64, |acc, (flag, _)| acc | flag);
    if bits & !known != 0 {
        debug!("Unknown flag bits 0x{:x} in '{}'", bits & !known, trimmed);
    }

    names.join("|")
}

/// Render a numeric code as its name; unknown or non-numeric text passes through
pub fn decode_enum(text: &str, table: &[(i64, &str)]) -> String {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(|code| table.iter().find(|(value, _)| *value == code))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EVENT_LEVEL_NAMES, FILE_ATTRIBUTE_FLAGS};

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("42", FieldType::Int), Some(FieldValue::Int(42)));
        assert_eq!(parse_numeric(" -7 ", FieldType::Long), Some(FieldValue::Long(-7)));
        assert_eq!(parse_numeric("-7", FieldType::UnsignedLong), None);
        assert_eq!(parse_numeric("1.5", FieldType::Float), Some(FieldValue::Float(1.5)));
        assert_eq!(parse_numeric("1,024", FieldType::Int), None);
        assert_eq!(parse_numeric("abc", FieldType::Float), None);
    }

    #[test]
    fn test_parse_timespan() {
        assert_eq!(parse_timespan("00:00:05"), Some(TimeDelta::seconds(5)));
        assert_eq!(
            parse_timespan("1.02:03:04"),
            Some(TimeDelta::seconds(86_400 + 2 * 3_600 + 3 * 60 + 4))
        );
        assert_eq!(
            parse_timespan("00:00:01.5"),
            Some(TimeDelta::milliseconds(1_500))
        );
        assert_eq!(
            parse_timespan("00:00:00.0000001"),
            Some(TimeDelta::nanoseconds(100))
        );
        assert_eq!(parse_timespan("-00:01:00"), Some(TimeDelta::seconds(-60)));
        assert_eq!(parse_timespan("25:00:00"), None);
        assert_eq!(parse_timespan("five seconds"), None);
    }

    #[test]
    fn test_decode_hex_flags() {
        assert_eq!(decode_hex_flags("0x20", FILE_ATTRIBUTE_FLAGS), "Archive");
        assert_eq!(decode_hex_flags("0x2022", FILE_ATTRIBUTE_FLAGS), "Hidden|Archive|NotContentIndexed");
        assert_eq!(decode_hex_flags("6", FILE_ATTRIBUTE_FLAGS), "Hidden|System");
        assert_eq!(decode_hex_flags("0x0", FILE_ATTRIBUTE_FLAGS), "");
    }

    #[test]
    fn test_decode_hex_flags_garbage_is_empty() {
        assert_eq!(decode_hex_flags("0xZZ12", FILE_ATTRIBUTE_FLAGS), "");
        assert_eq!(decode_hex_flags("0x", FILE_ATTRIBUTE_FLAGS), "");
        assert_eq!(decode_hex_flags("", FILE_ATTRIBUTE_FLAGS), "");
    }

    #[test]
    fn test_decode_enum() {
        assert_eq!(decode_enum("4", EVENT_LEVEL_NAMES), "Information");
        assert_eq!(decode_enum("99", EVENT_LEVEL_NAMES), "99");
        assert_eq!(decode_enum("Warning", EVENT_LEVEL_NAMES), "Warning");
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(zero_value(FieldType::Int, false), FieldValue::Int(0));
        assert_eq!(zero_value(FieldType::Int, true), FieldValue::Null);
        assert_eq!(zero_value(FieldType::NullableDateTime, false), FieldValue::Null);
        assert_eq!(zero_value(FieldType::String, false), FieldValue::Text(String::new()));
    }
}
