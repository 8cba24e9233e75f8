//! Configuration management and validation.
//!
//! Provides configuration structures for ingestion parameters and directory
//! scans. Both follow a `Default` + builder style so callers only override
//! what they need.

use crate::constants::{
    DEFAULT_MAX_CONSECUTIVE_MALFORMED, DEFAULT_MAX_PREAMBLE_LINES, DEFAULT_SCAN_EXTENSIONS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How several matching classification rules combine into one label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClassificationMode {
    /// Each matching rule overwrites the previous label
    #[default]
    LastMatchWins,
    /// Every matching label is kept, pipe-joined in rule order
    Accumulate,
}

/// Per-file ingestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// How timeline classification rules combine
    pub classification_mode: ClassificationMode,

    /// Consecutive single-column rows tolerated before the file is declared corrupt
    pub max_consecutive_malformed: usize,

    /// Abort the file once more than this many row errors are collected
    pub max_row_errors: Option<usize>,

    /// Register the generic (discovered columns) schema as last-priority fallback
    pub generic_fallback: bool,

    /// Maximum lines read before giving up on finding a header
    pub max_preamble_lines: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            classification_mode: ClassificationMode::LastMatchWins,
            max_consecutive_malformed: DEFAULT_MAX_CONSECUTIVE_MALFORMED,
            max_row_errors: None,
            generic_fallback: false,
            max_preamble_lines: DEFAULT_MAX_PREAMBLE_LINES,
        }
    }
}

impl IngestConfig {
    /// Set the classification combination mode
    pub fn with_classification_mode(mut self, mode: ClassificationMode) -> Self {
        self.classification_mode = mode;
        self
    }

    /// Set the structural corruption threshold
    pub fn with_max_consecutive_malformed(mut self, rows: usize) -> Self {
        self.max_consecutive_malformed = rows;
        self
    }

    /// Cap the number of row errors collected before aborting
    pub fn with_max_row_errors(mut self, max: usize) -> Self {
        self.max_row_errors = Some(max);
        self
    }

    /// Enable the generic CSV fallback schema
    pub fn with_generic_fallback(mut self) -> Self {
        self.generic_fallback = true;
        self
    }

    /// Set how many lines may precede the header
    pub fn with_max_preamble_lines(mut self, lines: usize) -> Self {
        self.max_preamble_lines = lines;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_consecutive_malformed == 0 {
            return Err(Error::configuration(
                "max_consecutive_malformed must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Settings for scanning many candidate files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of files processed concurrently
    pub workers: usize,

    /// Descend into sub-directories
    pub recursive: bool,

    /// File extensions considered when walking directories (lowercase, no dot)
    pub extensions: Vec<String>,

    /// Per-file ingestion settings
    pub ingest: IngestConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            recursive: true,
            extensions: DEFAULT_SCAN_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            ingest: IngestConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Set the number of concurrent workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Only scan the top level of each directory
    pub fn without_recursion(mut self) -> Self {
        self.recursive = false;
        self
    }

    /// Replace the extension filter
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Set per-file ingestion settings
    pub fn with_ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    /// Check whether a file extension is included in the scan
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.extensions.iter().any(|ext| *ext == extension)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if self.extensions.is_empty() {
            return Err(Error::configuration("at least one extension is required"));
        }
        self.ingest.validate()
    }
}
