//! Schema registry for supported tool formats
//!
//! This module holds the declarative descriptions of every CSV/TSV format the
//! pipeline understands. Registration validates each schema's field plan once;
//! afterwards the registry is read-only and safe to share between threads.
//!
//! ## Architecture
//!
//! - [`schema`] - Schema, field and parse option declarations
//! - [`field_plan`] - Validated field plans (fixed and discovered)
//! - [`catalog`] - Built-in schemas for common forensic tools

pub mod catalog;
pub mod field_plan;
pub mod schema;

#[cfg(test)]
pub mod tests;

use std::sync::Arc;
use tracing::debug;

use crate::config::IngestConfig;
use crate::{Error, Result};

// Re-export key types for convenience
pub use field_plan::{FieldPlan, normalize_column_name};
pub use schema::{
    DateFormat, DateStyle, Decoding, Delimiter, FieldSource, FieldSpec, FieldType,
    LineNumbering, ParseOptions, Schema, SchemaKind, SchemaLayout, TimelineFields,
};

/// A schema together with its validated plan and normalized header variants
#[derive(Debug, Clone)]
pub struct RegisteredSchema {
    schema: Schema,
    plan: FieldPlan,
    normalized_headers: Vec<String>,
}

impl RegisteredSchema {
    /// Validate a schema and precompute its matching data
    pub fn new(schema: Schema) -> Result<Self> {
        let plan = FieldPlan::build(&schema)?;
        let normalized_headers = schema
            .header_variants
            .iter()
            .map(|variant| normalize_header_for(&schema, variant))
            .collect();

        Ok(Self {
            schema,
            plan,
            normalized_headers,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn id(&self) -> &str {
        &self.schema.id
    }

    /// Declared plan (empty for discovered schemas)
    pub fn plan(&self) -> &FieldPlan {
        &self.plan
    }

    /// Check a header line that has already had its BOM and line ending removed
    pub fn matches_header(&self, header_line: &str) -> bool {
        if self.schema.is_discovered() {
            return !header_line.trim().is_empty();
        }

        let normalized = normalize_header_for(&self.schema, header_line);
        self.normalized_headers.iter().any(|h| *h == normalized)
    }
}

/// Lowercase a header line, stripping spaces when the schema ignores them
fn normalize_header_for(schema: &Schema, header_line: &str) -> String {
    let lowered = header_line.trim_end_matches(['\r', '\n']).to_lowercase();
    if schema.whitespace_insensitive {
        lowered.replace(' ', "")
    } else {
        lowered
    }
}

/// Registry of known formats in registration (match priority) order
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: Vec<Arc<RegisteredSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in catalog
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for schema in catalog::builtin_schemas() {
            registry.register(schema)?;
        }
        debug!("Registered {} built-in schemas", registry.len());
        Ok(registry)
    }

    /// Built-in catalog plus the generic fallback when the config asks for it
    pub fn from_config(config: &IngestConfig) -> Result<Self> {
        let registry = Self::builtin()?;
        if config.generic_fallback {
            registry.with_generic_fallback()
        } else {
            Ok(registry)
        }
    }

    /// Register the generic discovered-columns schema as lowest priority
    pub fn with_generic_fallback(mut self) -> Result<Self> {
        self.register(catalog::generic_csv())?;
        Ok(self)
    }

    /// Add a schema; fails if its id is already registered
    pub fn register(&mut self, schema: Schema) -> Result<()> {
        if self.get(&schema.id).is_some() {
            return Err(Error::duplicate_schema(&schema.id));
        }

        let registered = RegisteredSchema::new(schema)?;
        debug!(
            "Registered schema '{}' ({} fields)",
            registered.id(),
            registered.plan().len()
        );
        self.entries.push(Arc::new(registered));
        Ok(())
    }

    /// All schemas in registration order
    pub fn all(&self) -> &[Arc<RegisteredSchema>] {
        &self.entries
    }

    /// Look up a schema by id
    pub fn get(&self, id: &str) -> Option<&Arc<RegisteredSchema>> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest preamble declared by any schema
    pub fn max_preamble_lines(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.schema().preamble_lines)
            .max()
            .unwrap_or(0)
    }
}
