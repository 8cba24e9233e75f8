//! Column mapping from header names to row positions
//!
//! Built once per file from the actual header row so declared source columns
//! resolve to indexes regardless of case (and spacing, for schemas that
//! ignore it).

use std::collections::HashMap;

use crate::app::services::schema_registry::normalize_column_name;

/// Header name to index mapping for one file
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Normalized column name to index mapping
    name_to_index: HashMap<String, usize>,

    /// Number of columns in the header row
    column_count: usize,

    whitespace_insensitive: bool,
}

impl ColumnMapping {
    /// Analyze header fields; the first occurrence of a repeated name wins
    pub fn analyze(header_fields: &[String], whitespace_insensitive: bool) -> Self {
        let mut name_to_index = HashMap::new();

        for (index, header) in header_fields.iter().enumerate() {
            let name = normalize_column_name(header, whitespace_insensitive);
            name_to_index.entry(name).or_insert(index);
        }

        Self {
            name_to_index,
            column_count: header_fields.len(),
            whitespace_insensitive,
        }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        let name = normalize_column_name(column_name, self.whitespace_insensitive);
        self.name_to_index.get(&name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.get_index(column_name).is_some()
    }

    /// Number of columns in the header row
    pub fn column_count(&self) -> usize {
        self.column_count
    }
}
