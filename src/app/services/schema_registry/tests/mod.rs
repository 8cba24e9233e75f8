//! Tests for schema declarations, field plans and the registry

use super::{FieldSpec, Schema};

// Test modules
mod catalog_tests;
mod registry_tests;

/// Minimal valid fixed schema
pub fn simple_schema(id: &str) -> Schema {
    Schema::fixed(id, id)
        .header("Name,Size")
        .field(FieldSpec::string("Name").required())
        .field(FieldSpec::long("Size"))
}
