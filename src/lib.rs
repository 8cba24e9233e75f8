//! Timeline Ingest Library
//!
//! A Rust library for loading the CSV/TSV output of forensic tools (disk
//! artifact extractors, registry parsers, event log parsers, browser history
//! exporters, timeline aggregators) into strongly-typed records for a
//! timeline viewer.
//!
//! This library provides tools for:
//! - Recognising a file's source tool from its header row against a registry
//!   of declarative schemas
//! - Parsing rows into typed values (dates, flags, numerics, time spans) while
//!   tolerating malformed rows without aborting the file
//! - Annotating records with line numbers, previously tagged status and a
//!   keyword-based classification for timeline formats
//! - Exporting parsed records to Parquet or CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod header_matcher;
        pub mod ingestion_pipeline;
        pub mod record_annotator;
        pub mod record_export;
        pub mod row_parser;
        pub mod schema_registry;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldValue, Record, RowError, RowErrorKind, TaggedLineSet};
pub use app::services::ingestion_pipeline::{IngestOutcome, IngestionPipeline};
pub use app::services::schema_registry::{Schema, SchemaRegistry};
pub use config::IngestConfig;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, Error>;

/// File-level and registry-level error types
///
/// Row-level failures are not represented here; they are collected as
/// [`RowError`] values alongside the successfully parsed records.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No registered schema matches the file header
    #[error("Unrecognized format: no schema matches the header of '{source_name}'")]
    UnrecognizedFormat { source_name: String },

    /// File-level parse failure (I/O during streaming or structural corruption)
    #[error("Parse error in '{source_name}' after line {last_good_line}: {reason}")]
    Parse {
        source_name: String,
        last_good_line: usize,
        reason: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A schema with the same id is already registered
    #[error("Duplicate schema id: {id}")]
    DuplicateSchema { id: String },

    /// Schema declaration failed validation
    #[error("Invalid schema '{id}': {reason}")]
    InvalidSchema { id: String, reason: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Record export failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },
}

impl Error {
    /// Create an unrecognized format error
    pub fn unrecognized_format(source_name: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            source_name: source_name.into(),
        }
    }

    /// Create a file-level parse error
    pub fn parse(
        source_name: impl Into<String>,
        last_good_line: usize,
        reason: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            last_good_line,
            reason: reason.into(),
            source,
        }
    }

    /// Create a duplicate schema error
    pub fn duplicate_schema(id: impl Into<String>) -> Self {
        Self::DuplicateSchema { id: id.into() }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Export {
            message: message.into(),
            source,
        }
    }

    /// True when the error only means "this file is not one of ours"
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedFormat { .. })
    }

    /// Last successfully parsed line for file-level parse failures
    pub fn last_good_line(&self) -> Option<usize> {
        match self {
            Self::Parse { last_good_line, .. } => Some(*last_good_line),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Parse {
            source_name: "unknown".to_string(),
            last_good_line: 0,
            reason: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Export {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}
