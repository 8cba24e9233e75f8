//! Test utilities for row parser testing
//!
//! Helpers build a parser for a schema and header without going through
//! the registry.

use crate::app::services::schema_registry::{FieldPlan, Schema};

use super::RowParser;

// Test modules
mod column_mapping_tests;

/// Split a header or data line on commas
pub fn split(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.to_string()).collect()
}

/// Build a row parser for a schema and comma-separated header line
pub fn parser_for(schema: &Schema, header: &str) -> RowParser {
    let plan = FieldPlan::build(schema).unwrap();
    RowParser::new(schema, &plan, &split(header))
}
