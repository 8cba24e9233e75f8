//! Command-line argument definitions for timeline-ingest
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::record_export::ExportCompression;
use crate::config::{ClassificationMode, IngestConfig, ScanConfig};
use crate::constants::DEFAULT_MAX_CONSECUTIVE_MALFORMED;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the forensic tool output ingester
///
/// Recognises the CSV/TSV output of forensic tools by its header row and
/// parses it into typed, tagged timeline records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "timeline-ingest",
    version,
    about = "Recognise and parse forensic tool CSV/TSV output into typed timeline records",
    long_about = "Matches the header row of forensic tool output (KAPE, EZ Tools, NirSoft, \
                  Sysinternals, RegRipper, log2timeline) against a registry of known schemas, \
                  parses rows into typed values while tolerating malformed data, and annotates \
                  records with line numbers, tagged status and timeline classifications."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress everything but errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List the schemas that can be recognised
    Schemas(SchemasArgs),
    /// Report which schema a file's header matches
    Identify(IdentifyArgs),
    /// Parse a single file and print or export its records
    Process(ProcessArgs),
    /// Ingest many files concurrently and summarise the results
    Scan(ScanArgs),
}

/// Arguments for the schemas command
#[derive(Debug, Clone, Parser)]
pub struct SchemasArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the schema list"
    )]
    pub format: OutputFormat,

    #[arg(long = "generic-fallback", help = "Include the generic CSV fallback schema")]
    pub generic_fallback: bool,
}

/// Arguments for the identify command
#[derive(Debug, Clone, Parser)]
pub struct IdentifyArgs {
    /// File whose header should be matched
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "generic-fallback", help = "Fall back to the generic CSV schema")]
    pub generic_fallback: bool,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Tool output file to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// File listing previously tagged line numbers
    ///
    /// Line numbers may be separated by commas, spaces or newlines.
    #[arg(
        short = 't',
        long = "tagged",
        value_name = "FILE",
        help = "File listing previously tagged line numbers"
    )]
    pub tagged: Option<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for parsed records"
    )]
    pub format: OutputFormat,

    /// Only print the first N records (table output)
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Write records to a Parquet or CSV file (chosen by extension)
    #[arg(
        short = 'o',
        long = "export",
        value_name = "PATH",
        help = "Export records to Parquet or CSV (by file extension)"
    )]
    pub export: Option<PathBuf>,

    #[arg(
        long = "compression",
        value_enum,
        default_value = "snappy",
        help = "Parquet compression algorithm"
    )]
    pub compression: CompressionArg,

    #[arg(long = "generic-fallback", help = "Fall back to the generic CSV schema")]
    pub generic_fallback: bool,

    /// Keep every matching classification label instead of the last one
    #[arg(long = "accumulate", help = "Keep all matching classification labels")]
    pub accumulate: bool,

    #[arg(
        long = "max-row-errors",
        value_name = "COUNT",
        help = "Abort the file once more than COUNT rows are rejected"
    )]
    pub max_row_errors: Option<usize>,

    #[arg(
        long = "max-malformed",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_CONSECUTIVE_MALFORMED,
        help = "Consecutive malformed rows before the file is declared corrupt"
    )]
    pub max_consecutive_malformed: usize,
}

/// Arguments for the scan command
#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    /// Files, directories or glob patterns to ingest
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Number of files processed concurrently (defaults to CPU count)
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    #[arg(long = "no-recursive", help = "Do not descend into sub-directories")]
    pub no_recursive: bool,

    /// Comma-separated extensions considered when walking directories
    #[arg(
        short = 'e',
        long = "extensions",
        value_name = "LIST",
        value_delimiter = ','
    )]
    pub extensions: Option<Vec<String>>,

    #[arg(long = "generic-fallback", help = "Fall back to the generic CSV schema")]
    pub generic_fallback: bool,

    #[arg(long = "accumulate", help = "Keep all matching classification labels")]
    pub accumulate: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the scan summary"
    )]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON for scripting
    Json,
}

/// Parquet compression choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    Snappy,
    Zstd,
    Lz4,
    None,
}

impl From<CompressionArg> for ExportCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Snappy => ExportCompression::Snappy,
            CompressionArg::Zstd => ExportCompression::Zstd,
            CompressionArg::Lz4 => ExportCompression::Lz4,
            CompressionArg::None => ExportCompression::Uncompressed,
        }
    }
}

fn classification_mode(accumulate: bool) -> ClassificationMode {
    if accumulate {
        ClassificationMode::Accumulate
    } else {
        ClassificationMode::LastMatchWins
    }
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl IdentifyArgs {
    pub fn ingest_config(&self) -> IngestConfig {
        let config = IngestConfig::default();
        if self.generic_fallback {
            config.with_generic_fallback()
        } else {
            config
        }
    }
}

impl ProcessArgs {
    /// Ingestion settings selected by the flags
    pub fn ingest_config(&self) -> Result<IngestConfig> {
        let mut config = IngestConfig::default()
            .with_classification_mode(classification_mode(self.accumulate))
            .with_max_consecutive_malformed(self.max_consecutive_malformed);
        if let Some(max) = self.max_row_errors {
            config = config.with_max_row_errors(max);
        }
        if self.generic_fallback {
            config = config.with_generic_fallback();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if let Some(tagged) = &self.tagged {
            if !tagged.is_file() {
                return Err(Error::configuration(format!(
                    "Tagged line file does not exist: {}",
                    tagged.display()
                )));
            }
        }

        if let Some(export) = &self.export {
            if let Some(parent) = export.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Export directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

impl ScanArgs {
    /// Scan settings selected by the flags
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let mut ingest =
            IngestConfig::default().with_classification_mode(classification_mode(self.accumulate));
        if self.generic_fallback {
            ingest = ingest.with_generic_fallback();
        }

        let mut config = ScanConfig::default().with_ingest(ingest);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if self.no_recursive {
            config = config.without_recursion();
        }
        if let Some(extensions) = &self.extensions {
            config = config.with_extensions(extensions.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
