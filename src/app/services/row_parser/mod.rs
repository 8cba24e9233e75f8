//! Row parsing for matched tool output files
//!
//! Converts the raw columns of each data row into typed field values
//! according to a schema's field plan. Bad or missing values reject only the
//! row they occur in; the caller decides what to do with the rejection.
//!
//! ## Architecture
//!
//! - [`column_mapping`] - Header name to position lookup for one file
//! - [`record_parser`] - Per-row conversion into [`Record`](crate::Record) values
//! - [`field_parsers`] - Numeric, time span, flag and enum conversions
//! - [`datetime`] - Timestamp parsing with explicit formats and date styles
//!
//! ## Usage
//!
//! ```rust
//! use timeline_ingest::app::services::row_parser::RowParser;
//! use timeline_ingest::app::services::schema_registry::{FieldPlan, FieldSpec, Schema};
//!
//! # fn example() -> timeline_ingest::Result<()> {
//! let schema = Schema::fixed("skip", "Skip log")
//!     .header("SourceFile,Reason")
//!     .field(FieldSpec::string("SourceFile").required());
//! let plan = FieldPlan::build(&schema)?;
//!
//! let header = vec!["SourceFile".to_string(), "Reason".to_string()];
//! let parser = RowParser::new(&schema, &plan, &header);
//! let record = parser
//!     .parse_row(&["C:\\foo.dat".to_string(), "Locked".to_string()])
//!     .expect("row parses");
//! assert_eq!(record.get("SourceFile").and_then(|v| v.as_text()), Some("C:\\foo.dat"));
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod datetime;
pub mod field_parsers;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use datetime::parse_datetime;
pub use record_parser::RowParser;
