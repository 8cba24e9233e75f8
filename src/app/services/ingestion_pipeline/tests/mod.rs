//! Test utilities for ingestion pipeline testing
//!
//! Provides small registries, pipelines wired to a collecting sink and
//! temporary file helpers.

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use super::{CollectingSink, IngestionPipeline};
use crate::app::services::schema_registry::{FieldSpec, Schema, SchemaRegistry};

// Test modules
mod diagnostics_tests;

/// Skip log data used across tests
pub const SKIP_LOG: &str = "SourceFile,SourceFileSha1,Reason\n\
                            foo.dat,ABCD1234,not found\n\
                            bar.dat,EF567890,locked\n";

/// Built-in registry
pub fn builtin_registry() -> Arc<SchemaRegistry> {
    Arc::new(SchemaRegistry::builtin().unwrap())
}

/// Registry holding only the given schemas, in order
pub fn registry_of(schemas: Vec<Schema>) -> Arc<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for schema in schemas {
        registry.register(schema).unwrap();
    }
    Arc::new(registry)
}

/// Pipeline reporting into a sink the test can inspect
pub fn collecting_pipeline(registry: Arc<SchemaRegistry>) -> (IngestionPipeline, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let pipeline = IngestionPipeline::new(registry).with_sink(sink.clone());
    (pipeline, sink)
}

/// Schema with a required name and an optional size
pub fn inventory_schema() -> Schema {
    Schema::fixed("inventory", "Inventory")
        .header("Name,Size")
        .field(FieldSpec::string("Name").required())
        .field(FieldSpec::long("Size"))
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
