//! Core data structures for parsed forensic tool output
//!
//! Defines the typed field values, the annotated record handed to the host,
//! the caller-owned set of previously tagged lines, and row-level errors.

use chrono::{DateTime, TimeDelta, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::constants::{DISPLAY_DATETIME_FORMAT, SEARCH_TEXT_SEPARATOR};
use crate::{Error, Result};

/// A single typed value extracted from a source column
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value for nullable fields and ignored (computed) fields
    Null,
    Text(String),
    Int(i32),
    Long(i64),
    UnsignedLong(u64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    TimeSpan(TimeDelta),
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the text of a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get a datetime value
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Get a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get any signed integer value widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(i64::from(*value)),
            FieldValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Get a floating point value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Int(value) => write!(f, "{}", value),
            FieldValue::Long(value) => write!(f, "{}", value),
            FieldValue::UnsignedLong(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.format(DISPLAY_DATETIME_FORMAT)),
            FieldValue::TimeSpan(span) => f.write_str(&format_timespan(span)),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Int(value) => serializer.serialize_i32(*value),
            FieldValue::Long(value) => serializer.serialize_i64(*value),
            FieldValue::UnsignedLong(value) => serializer.serialize_u64(*value),
            FieldValue::Float(value) => serializer.serialize_f64(*value),
            FieldValue::Bool(value) => serializer.serialize_bool(*value),
            FieldValue::DateTime(dt) => dt.serialize(serializer),
            FieldValue::TimeSpan(span) => serializer.serialize_str(&format_timespan(span)),
        }
    }
}

/// Render a time span as `[-][d.]hh:mm:ss[.fffffff]`
pub fn format_timespan(span: &TimeDelta) -> String {
    let negative = *span < TimeDelta::zero();
    let abs = span.abs();
    let total_seconds = abs.num_seconds();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    // 100ns ticks, matching the seven fractional digits tools emit
    let ticks = abs.subsec_nanos() / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// One parsed, annotated data row
///
/// Values are stored in the field plan's output order; `columns` is shared
/// between all records produced from the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<FieldValue>,
    line: usize,
    tagged: bool,
    classification: Option<String>,
    search_text: String,
}

impl Record {
    /// Create an unannotated record (line 0, untagged)
    pub fn new(columns: Arc<[String]>, values: Vec<FieldValue>) -> Self {
        let mut record = Self {
            columns,
            values,
            line: 0,
            tagged: false,
            classification: None,
            search_text: String::new(),
        };
        record.rebuild_search_text();
        record
    }

    /// 1-based line of this record within the data portion of the file
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether the host previously tagged this line
    pub fn tagged(&self) -> bool {
        self.tagged
    }

    /// Update tagged status (host-side only)
    pub fn set_tagged(&mut self, tagged: bool) {
        self.tagged = tagged;
    }

    /// Classification label for timeline records
    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    /// Concatenated field values used for full-text search
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Output column names in field order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Field values in column order
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Iterate over `(name, value)` pairs in column order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Look up a value by output field name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.position(name).and_then(|index| self.values.get(index))
    }

    /// Replace a value by output field name, regenerating the search text
    ///
    /// Returns false if the record has no such field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.position(name) {
            Some(index) => {
                self.values[index] = value;
                self.rebuild_search_text();
                true
            }
            None => false,
        }
    }

    pub(crate) fn assign_line(&mut self, line: usize) {
        debug_assert_eq!(self.line, 0, "line numbers are assigned once");
        self.line = line;
    }

    pub(crate) fn set_classification(&mut self, classification: Option<String>) {
        self.classification = classification;
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    fn rebuild_search_text(&mut self) {
        self.search_text = self
            .values
            .iter()
            .filter(|value| !value.is_null())
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(SEARCH_TEXT_SEPARATOR);
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 3))?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("tagged", &self.tagged)?;
        if let Some(classification) = &self.classification {
            map.serialize_entry("classification", classification)?;
        }
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Caller-owned set of previously tagged line numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedLineSet {
    lines: HashSet<usize>,
}

impl TaggedLineSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a line was tagged
    pub fn contains(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// Number of tagged lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines are tagged
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Parse a list of line numbers separated by commas or whitespace
    pub fn parse_list(text: &str) -> Result<Self> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<usize>().map_err(|e| {
                    Error::configuration(format!("Invalid tagged line '{}': {}", token, e))
                })
            })
            .collect()
    }
}

impl FromIterator<usize> for TaggedLineSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Reason a single data row was rejected
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowErrorKind {
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("invalid date for field '{field}': '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("invalid number for field '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("invalid time span for field '{field}': '{value}'")]
    InvalidTimeSpan { field: String, value: String },

    #[error("malformed row: {reason}")]
    Malformed { reason: String },
}

/// A rejected data row with enough context to locate it in the source
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("Row {row}: {kind}")]
pub struct RowError {
    /// 1-based ordinal of the row within the data portion (rejected rows included)
    pub row: usize,

    /// Raw row text, fields re-joined with the file delimiter
    pub raw: String,

    /// Why the row was rejected
    pub kind: RowErrorKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn columns(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_record_search_text_and_lookup() {
        let record = Record::new(
            columns(&["Name", "Size", "Deleted"]),
            vec![
                FieldValue::Text("foo.dat".to_string()),
                FieldValue::Long(42),
                FieldValue::Null,
            ],
        );

        assert_eq!(record.search_text(), "foo.dat 42");
        assert_eq!(record.get("Size"), Some(&FieldValue::Long(42)));
        assert_eq!(record.get("Missing"), None);
        assert_eq!(record.line(), 0);
        assert!(!record.tagged());
    }

    #[test]
    fn test_record_set_regenerates_search_text() {
        let mut record = Record::new(
            columns(&["Name", "Note"]),
            vec![FieldValue::Text("a".to_string()), FieldValue::Null],
        );

        assert!(record.set("Note", FieldValue::Text("reviewed".to_string())));
        assert_eq!(record.search_text(), "a reviewed");
        assert!(!record.set("Unknown", FieldValue::Null));
    }

    #[test]
    fn test_field_value_display() {
        let dt = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(FieldValue::DateTime(dt).to_string(), "2023-01-02 03:04:05");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "");
    }

    #[test]
    fn test_format_timespan() {
        assert_eq!(format_timespan(&TimeDelta::seconds(3_725)), "01:02:05");
        assert_eq!(
            format_timespan(&(TimeDelta::days(2) + TimeDelta::milliseconds(1_500))),
            "2.00:00:01.5000000"
        );
        assert_eq!(format_timespan(&TimeDelta::seconds(-61)), "-00:01:01");
    }

    #[test]
    fn test_tagged_line_set_parse_list() {
        let tagged = TaggedLineSet::parse_list("1, 4\n9 12").unwrap();
        assert_eq!(tagged.len(), 4);
        assert!(tagged.contains(9));
        assert!(!tagged.contains(2));

        assert!(TaggedLineSet::parse_list("1,x").is_err());
        assert!(TaggedLineSet::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_record_serializes_annotations_first() {
        let mut record = Record::new(
            columns(&["SourceFile"]),
            vec![FieldValue::Text("foo.dat".to_string())],
        );
        record.assign_line(3);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"line":3,"tagged":false,"SourceFile":"foo.dat"}"#);
    }
}
