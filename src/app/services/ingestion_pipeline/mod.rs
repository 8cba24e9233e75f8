//! Ingestion pipeline for forensic tool CSV/TSV output
//!
//! This module ties the services together for one source at a time: header
//! matching, row parsing and record annotation. Row-level problems are
//! collected next to the records; only I/O failures and structural
//! corruption abort a file.
//!
//! ## Architecture
//!
//! - [`pipeline`] - Orchestration and the `Start → Done | Failed` lifecycle
//! - [`diagnostics`] - Pipeline states, events and injectable sinks
//! - [`stats`] - Per-file statistics
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use timeline_ingest::{IngestionPipeline, SchemaRegistry, TaggedLineSet};
//!
//! # fn example() -> timeline_ingest::Result<()> {
//! let registry = Arc::new(SchemaRegistry::builtin()?);
//! let pipeline = IngestionPipeline::new(registry);
//!
//! let data = "SourceFile,SourceFileSha1,Reason\nfoo.dat,ABCD1234,not found\n";
//! let outcome = pipeline.process_reader(data.as_bytes(), "skip.csv", &TaggedLineSet::new())?;
//!
//! println!("{} records as {}", outcome.records.len(), outcome.schema_id);
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use diagnostics::{
    CollectingSink, DiagnosticSink, IngestEvent, NullSink, PipelineState, TracingSink,
};
pub use pipeline::{IngestOutcome, IngestionPipeline};
pub use stats::IngestStats;
