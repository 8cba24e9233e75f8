//! Individual row parsing for a matched schema
//!
//! A [`RowParser`] is built once per file from the schema's field plan and
//! the file's actual header row. Each data row then becomes either a typed
//! [`Record`] or a [`RowErrorKind`] describing why the row was rejected.

use std::sync::Arc;
use tracing::trace;

use super::column_mapping::ColumnMapping;
use super::datetime::parse_datetime;
use super::field_parsers::{decode, parse_numeric, parse_timespan, zero_value};
use crate::app::models::{FieldValue, Record, RowErrorKind};
use crate::app::services::schema_registry::{FieldPlan, FieldSource, FieldSpec, FieldType, Schema};
use crate::constants::COMPOSITE_SEPARATOR;

/// Source of a field's raw text, resolved against one file's header
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolvedSource {
    Index(usize),
    Composite(Vec<Option<usize>>),
    /// Declared column not present in this file's header
    Absent,
    Ignored,
}

/// Converts raw rows of one file into typed records
#[derive(Debug, Clone)]
pub struct RowParser {
    columns: Arc<[String]>,
    fields: Vec<(FieldSpec, ResolvedSource)>,
    truthy_tokens: Vec<String>,
    mapping: ColumnMapping,
}

impl RowParser {
    /// Resolve a plan's sources against the header row of a file
    pub fn new(schema: &Schema, plan: &FieldPlan, header_fields: &[String]) -> Self {
        let mapping = ColumnMapping::analyze(header_fields, schema.whitespace_insensitive);

        let fields = plan
            .fields()
            .iter()
            .map(|field| {
                let source = resolve_source(&field.source, &mapping);
                if source == ResolvedSource::Absent {
                    trace!("Field '{}' has no source column in this file", field.output);
                }
                (field.clone(), source)
            })
            .collect();

        Self {
            columns: plan.columns(),
            fields,
            truthy_tokens: schema.truthy_tokens.clone(),
            mapping,
        }
    }

    /// Output column names shared by every record this parser builds
    pub fn columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    /// Number of columns in the header the parser was built from
    pub fn header_width(&self) -> usize {
        self.mapping.column_count()
    }

    /// Parse one data row into an unannotated record
    pub fn parse_row(&self, raw: &[String]) -> Result<Record, RowErrorKind> {
        let mut values = Vec::with_capacity(self.fields.len());

        for (field, source) in &self.fields {
            let text = match source {
                ResolvedSource::Ignored => {
                    values.push(FieldValue::Null);
                    continue;
                }
                ResolvedSource::Index(index) => raw.get(*index).map(|value| value.to_string()),
                ResolvedSource::Composite(indexes) => compose(raw, indexes),
                ResolvedSource::Absent => None,
            };

            values.push(self.convert(field, text.as_deref())?);
        }

        Ok(Record::new(self.columns(), values))
    }

    /// Convert the raw text of one field
    fn convert(&self, field: &FieldSpec, text: Option<&str>) -> Result<FieldValue, RowErrorKind> {
        let options = &field.options;

        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ if options.required => {
                return Err(RowErrorKind::MissingField {
                    field: field.output.clone(),
                });
            }
            _ => return Ok(zero_value(field.field_type, options.nullable)),
        };

        match field.field_type {
            FieldType::String => Ok(FieldValue::Text(match options.decoding {
                Some(decoding) => decode(text, decoding),
                None => text.to_string(),
            })),
            FieldType::Int | FieldType::Long | FieldType::UnsignedLong | FieldType::Float => {
                match parse_numeric(text, field.field_type) {
                    Some(value) => Ok(value),
                    None if options.nullable => Ok(FieldValue::Null),
                    None => Err(RowErrorKind::InvalidNumber {
                        field: field.output.clone(),
                        value: text.to_string(),
                    }),
                }
            }
            FieldType::Bool => Ok(FieldValue::Bool(self.is_truthy(text))),
            FieldType::DateTime | FieldType::NullableDateTime => {
                let nullable = options.nullable || field.field_type == FieldType::NullableDateTime;
                match parse_datetime(text, &options.date_format, options.date_style) {
                    Some(dt) => Ok(FieldValue::DateTime(dt)),
                    None if nullable => Ok(FieldValue::Null),
                    None => Err(RowErrorKind::InvalidDate {
                        field: field.output.clone(),
                        value: text.to_string(),
                    }),
                }
            }
            FieldType::TimeSpan => match parse_timespan(text) {
                Some(span) => Ok(FieldValue::TimeSpan(span)),
                None if options.nullable => Ok(FieldValue::Null),
                None => Err(RowErrorKind::InvalidTimeSpan {
                    field: field.output.clone(),
                    value: text.to_string(),
                }),
            },
        }
    }

    fn is_truthy(&self, text: &str) -> bool {
        let text = text.trim();
        self.truthy_tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(text))
    }
}

fn resolve_source(source: &FieldSource, mapping: &ColumnMapping) -> ResolvedSource {
    match source {
        FieldSource::Column(name) => mapping
            .get_index(name)
            .map(ResolvedSource::Index)
            .unwrap_or(ResolvedSource::Absent),
        FieldSource::Position(position) => ResolvedSource::Index(*position),
        FieldSource::Composite(names) => {
            let indexes: Vec<Option<usize>> = names.iter().map(|n| mapping.get_index(n)).collect();
            if indexes.iter().all(Option::is_none) {
                ResolvedSource::Absent
            } else {
                ResolvedSource::Composite(indexes)
            }
        }
        FieldSource::Ignored => ResolvedSource::Ignored,
    }
}

/// Join the present, non-blank parts of a composite source
///
/// A composite whose parts are all missing or blank counts as missing.
fn compose(raw: &[String], indexes: &[Option<usize>]) -> Option<String> {
    let parts: Vec<&str> = indexes
        .iter()
        .filter_map(|index| index.and_then(|i| raw.get(i)))
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(COMPOSITE_SEPARATOR))
    }
}
