//! Validated field plans
//!
//! A [`FieldPlan`] is the checked, shareable form of a schema's field list.
//! Fixed schemas get theirs once at registration; discovered schemas build one
//! from the header of each file.

use std::collections::HashSet;
use std::sync::Arc;

use super::schema::{FieldSource, FieldSpec, FieldType, Schema, SchemaLayout};
use crate::{Error, Result};

/// Ordered output columns plus the declaration behind each
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    columns: Arc<[String]>,
    fields: Arc<[FieldSpec]>,
}

impl FieldPlan {
    /// Validate a fixed schema and build its plan
    ///
    /// Discovered schemas yield an empty plan; use [`FieldPlan::discover`]
    /// once the header is known. Declaring fields on one is an error.
    pub fn build(schema: &Schema) -> Result<Self> {
        let fields = match &schema.layout {
            SchemaLayout::Discovered => {
                if !schema.misplaced_fields().is_empty() {
                    return Err(Error::invalid_schema(
                        &schema.id,
                        format!(
                            "fields declared on a discovered layout: {}",
                            schema.misplaced_fields().join(", ")
                        ),
                    ));
                }
                return Ok(Self::from_fields(Vec::new()));
            }
            SchemaLayout::Fixed(fields) => fields,
        };

        if schema.header_variants.is_empty() {
            return Err(Error::invalid_schema(&schema.id, "no header variants declared"));
        }
        if fields.is_empty() {
            return Err(Error::invalid_schema(&schema.id, "no fields declared"));
        }

        let mut seen = HashSet::new();
        for field in fields {
            if !seen.insert(field.output.as_str()) {
                return Err(Error::invalid_schema(
                    &schema.id,
                    format!("duplicate output field '{}'", field.output),
                ));
            }
            validate_field(schema, field)?;
        }

        for variant in &schema.header_variants {
            let header_columns: Vec<String> = variant
                .split(schema.delimiter.as_char())
                .map(|column| normalize_column_name(column, schema.whitespace_insensitive))
                .collect();

            for field in fields.iter().filter(|f| f.options.required) {
                check_required_source(schema, field, &header_columns, variant)?;
            }
        }

        Ok(Self::from_fields(fields.clone()))
    }

    /// Build a plan of text fields from the columns of a header row
    ///
    /// Blank names become `ColumnN` and repeated names get a numeric suffix.
    pub fn discover(header_fields: &[String]) -> Self {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(header_fields.len());

        for (index, raw) in header_fields.iter().enumerate() {
            let base = match raw.trim() {
                "" => format!("Column{}", index + 1),
                name => name.to_string(),
            };

            let mut name = base.clone();
            let mut suffix = 2;
            while !seen.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            fields.push(FieldSpec::string(name).at(index));
        }

        Self::from_fields(fields)
    }

    fn from_fields(fields: Vec<FieldSpec>) -> Self {
        let columns = fields.iter().map(|f| f.output.clone()).collect();
        Self {
            columns,
            fields: fields.into(),
        }
    }

    /// Output column names shared with every record built from this plan
    pub fn columns(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    /// Field specs in output order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check whether any field holds a datetime (expected for timeline display)
    pub fn has_datetime(&self) -> bool {
        self.fields.iter().any(|f| f.field_type.is_datetime())
    }
}

/// Normalize a header column name for lookups
pub fn normalize_column_name(name: &str, whitespace_insensitive: bool) -> String {
    let trimmed = name.trim().trim_matches('"');
    let lowered = trimmed.to_lowercase();
    if whitespace_insensitive {
        lowered.replace(' ', "")
    } else {
        lowered
    }
}

fn validate_field(schema: &Schema, field: &FieldSpec) -> Result<()> {
    if field.options.decoding.is_some() && field.field_type != FieldType::String {
        return Err(Error::invalid_schema(
            &schema.id,
            format!("field '{}' decodes flags but is not a string", field.output),
        ));
    }

    let explicit_date = field.options.date_format != Default::default();
    if explicit_date && !field.field_type.is_datetime() {
        return Err(Error::invalid_schema(
            &schema.id,
            format!("field '{}' has a date format but is not a datetime", field.output),
        ));
    }

    match &field.source {
        FieldSource::Composite(columns) if columns.len() < 2 => Err(Error::invalid_schema(
            &schema.id,
            format!("composite field '{}' needs at least two columns", field.output),
        )),
        FieldSource::Ignored if field.options.required => Err(Error::invalid_schema(
            &schema.id,
            format!("ignored field '{}' cannot be required", field.output),
        )),
        _ => Ok(()),
    }
}

fn check_required_source(
    schema: &Schema,
    field: &FieldSpec,
    header_columns: &[String],
    variant: &str,
) -> Result<()> {
    let present = |column: &str| {
        let wanted = normalize_column_name(column, schema.whitespace_insensitive);
        header_columns.iter().any(|c| *c == wanted)
    };

    let ok = match &field.source {
        FieldSource::Column(column) => present(column),
        FieldSource::Composite(columns) => columns.iter().all(|c| present(c)),
        FieldSource::Position(position) => *position < header_columns.len(),
        FieldSource::Ignored => true,
    };

    if ok {
        Ok(())
    } else {
        Err(Error::invalid_schema(
            &schema.id,
            format!(
                "required field '{}' has no source column in header '{}'",
                field.output, variant
            ),
        ))
    }
}
