//! Pipeline state and diagnostic events
//!
//! The pipeline reports progress through an injected [`DiagnosticSink`]
//! instead of logging from deep inside the parser. The default sink forwards
//! events to `tracing`; tests use [`CollectingSink`] to assert on them.

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;
use tracing::{debug, info, trace, warn};

use super::stats::IngestStats;
use crate::app::models::RowError;

/// Lifecycle of one ingestion call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Start,
    HeaderRead,
    SchemaMatched,
    Streaming,
    Done,
    Failed,
}

impl PipelineState {
    /// Check if no further transitions can follow
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Start => "start",
            PipelineState::HeaderRead => "header-read",
            PipelineState::SchemaMatched => "schema-matched",
            PipelineState::Streaming => "streaming",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Structured event emitted while ingesting one source
#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent {
    StateChanged {
        source: String,
        state: PipelineState,
    },
    SchemaMatched {
        source: String,
        schema_id: String,
        header_line: usize,
    },
    /// No schema matched; an expected outcome, not a failure
    Unrecognized { source: String },
    RowRejected { source: String, error: RowError },
    Completed { source: String, stats: IngestStats },
    Failed { source: String, reason: String },
}

/// Receiver for pipeline diagnostics
pub trait DiagnosticSink: Send + Sync + fmt::Debug {
    fn emit(&self, event: &IngestEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &IngestEvent) {
        match event {
            IngestEvent::StateChanged { source, state } => {
                trace!("{}: {}", source, state);
            }
            IngestEvent::SchemaMatched {
                source,
                schema_id,
                header_line,
            } => {
                debug!(
                    "{}: matched schema '{}' at line {}",
                    source, schema_id, header_line
                );
            }
            IngestEvent::Unrecognized { source } => {
                debug!("{}: no schema matches header", source);
            }
            IngestEvent::RowRejected { source, error } => {
                debug!("{}: skipped {}", source, error);
            }
            IngestEvent::Completed { source, stats } => {
                info!(
                    "{}: parsed {} records from {} rows ({} rejected)",
                    source, stats.records_parsed, stats.total_rows, stats.rows_rejected
                );
            }
            IngestEvent::Failed { source, reason } => {
                warn!("{}: aborted: {}", source, reason);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _event: &IngestEvent) {}
}

/// Keeps events in memory in emission order
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<IngestEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<IngestEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// States visited, in order
    pub fn states(&self) -> Vec<PipelineState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                IngestEvent::StateChanged { state, .. } => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, event: &IngestEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
