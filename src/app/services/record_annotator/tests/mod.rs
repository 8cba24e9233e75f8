//! Test utilities for record annotation

use std::sync::Arc;

use crate::app::models::{FieldValue, Record};
use crate::app::services::schema_registry::{SchemaKind, TimelineFields};


/// Schema kind matching the log2timeline column names
pub fn timeline_kind() -> SchemaKind {
    SchemaKind::Timeline(TimelineFields {
        long_description: "LongDescription".to_string(),
        source_name: "Source".to_string(),
        source_description: "SourceDescription".to_string(),
    })
}

/// Unannotated timeline record with the three descriptive columns
pub fn timeline_record(long_description: &str, source: &str, source_description: &str) -> Record {
    let columns: Arc<[String]> = ["LongDescription", "Source", "SourceDescription"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    Record::new(
        columns,
        vec![
            FieldValue::Text(long_description.to_string()),
            FieldValue::Text(source.to_string()),
            FieldValue::Text(source_description.to_string()),
        ],
    )
}
