//! Ingestion statistics
//!
//! Counts gathered while streaming one file, used for summaries and for
//! deciding whether a file parsed cleanly enough to trust.

use serde::{Deserialize, Serialize};

/// Per-file ingestion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// 1-based line of the header row within the file
    pub header_line: usize,

    /// Data rows read after the header
    pub total_rows: usize,

    /// Rows that became records
    pub records_parsed: usize,

    /// Rows rejected with a row error
    pub rows_rejected: usize,
}

impl IngestStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if ingestion was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }

    /// Check if every data row became a record
    pub fn is_clean(&self) -> bool {
        self.rows_rejected == 0
    }
}
