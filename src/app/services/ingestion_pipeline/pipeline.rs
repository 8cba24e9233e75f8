//! Core ingestion pipeline implementation
//!
//! This module drives one file through the pipeline: locate and match the
//! header, build a row parser for the matched schema, then stream data rows
//! through parsing and annotation. Rows are never buffered ahead of parsing.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use csv::ByteRecord;
use tracing::{debug, info};

use super::diagnostics::{DiagnosticSink, IngestEvent, PipelineState, TracingSink};
use super::stats::IngestStats;
use crate::app::models::{Record, RowError, RowErrorKind, TaggedLineSet};
use crate::app::services::header_matcher::{HeaderMatcher, clean_header_line};
use crate::app::services::record_annotator::RecordAnnotator;
use crate::app::services::row_parser::RowParser;
use crate::app::services::schema_registry::{
    Delimiter, FieldPlan, LineNumbering, RegisteredSchema, Schema, SchemaRegistry,
};
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Records and row errors produced from one source
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Id of the schema that matched the header
    pub schema_id: String,

    /// Output column names, in field order
    pub columns: Arc<[String]>,

    /// Successfully parsed and annotated records
    pub records: Vec<Record>,

    /// Rows skipped because they could not be parsed
    pub row_errors: Vec<RowError>,

    pub stats: IngestStats,
}

impl IngestOutcome {
    /// Check if every data row became a record
    pub fn is_clean(&self) -> bool {
        self.row_errors.is_empty()
    }
}

/// Header line located at the top of a source
struct HeaderMatch {
    entry: Arc<RegisteredSchema>,
    line: String,
    /// Zero-based line index of the header
    index: usize,
}

/// Schema-driven ingestion for forensic tool output
///
/// The pipeline holds only read-only state, so one instance can serve many
/// concurrent `process_*` calls. Each call owns its records and errors.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    registry: Arc<SchemaRegistry>,
    config: IngestConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl IngestionPipeline {
    /// Create a pipeline over a populated registry
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            config: IngestConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the ingestion settings
    ///
    /// The settings are validated first; a rejected config leaves no
    /// pipeline behind.
    pub fn with_config(mut self, config: IngestConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Route diagnostics to a different sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Schemas this pipeline can ingest, in match priority order
    pub fn list_supported_schemas(&self) -> Vec<&Schema> {
        self.registry
            .all()
            .iter()
            .map(|entry| entry.schema())
            .collect()
    }

    /// Schema id whose header matches a single header line
    pub fn identify(&self, header_line: &str) -> Option<&str> {
        HeaderMatcher::new(&self.registry)
            .match_header(header_line)
            .map(|entry| entry.id())
    }

    /// Schema id for a file, honouring schema preambles
    pub fn identify_file(&self, path: &Path) -> Result<Option<String>> {
        let file = open(path)?;
        let source_name = path.display().to_string();
        let mut reader = BufReader::new(file);
        let found = self.locate_header(&mut reader, &source_name)?;
        Ok(found.map(|(header, _)| header.entry.id().to_string()))
    }

    /// Ingest a file from disk
    pub fn process_file(&self, path: &Path, tagged_lines: &TaggedLineSet) -> Result<IngestOutcome> {
        let file = open(path)?;
        self.process_reader(file, &path.display().to_string(), tagged_lines)
    }

    /// Ingest any byte stream
    ///
    /// `source_name` only labels diagnostics and errors.
    pub fn process_reader<R: Read>(
        &self,
        reader: R,
        source_name: &str,
        tagged_lines: &TaggedLineSet,
    ) -> Result<IngestOutcome> {
        self.transition(source_name, PipelineState::Start);

        let mut reader = BufReader::new(reader);
        let (header, rest) = match self.locate_header(&mut reader, source_name) {
            Ok(Some(found)) => found,
            Ok(None) => {
                self.sink.emit(&IngestEvent::Unrecognized {
                    source: source_name.to_string(),
                });
                return Err(Error::unrecognized_format(source_name));
            }
            Err(e) => return Err(self.fail(source_name, e)),
        };

        self.sink.emit(&IngestEvent::SchemaMatched {
            source: source_name.to_string(),
            schema_id: header.entry.id().to_string(),
            header_line: header.index + 1,
        });
        self.transition(source_name, PipelineState::SchemaMatched);

        let rows = Cursor::new(rest).chain(reader);
        match self.stream_rows(rows, source_name, &header, tagged_lines) {
            Ok(outcome) => {
                self.sink.emit(&IngestEvent::Completed {
                    source: source_name.to_string(),
                    stats: outcome.stats.clone(),
                });
                self.transition(source_name, PipelineState::Done);
                Ok(outcome)
            }
            Err(e) => Err(self.fail(source_name, e)),
        }
    }

    /// Read the preamble window and let a schema claim one line as its header
    ///
    /// Every line of the window is buffered before matching so that fixed
    /// schemas are tried at their own offsets ahead of any discovered
    /// layout. Returns `Ok(None)` when nothing in the window matches. On a
    /// match the buffered bytes after the header line are handed back for
    /// the row reader to consume first.
    fn locate_header<R: BufRead>(
        &self,
        reader: &mut R,
        source_name: &str,
    ) -> Result<Option<(HeaderMatch, Vec<u8>)>> {
        let window = self
            .registry
            .max_preamble_lines()
            .min(self.config.max_preamble_lines);

        let mut raw_lines: Vec<Vec<u8>> = Vec::with_capacity(window + 1);
        for index in 0..=window {
            let mut buffer = Vec::new();
            let read = reader.read_until(b'\n', &mut buffer).map_err(|e| {
                Error::parse(
                    source_name,
                    0,
                    format!("failed to read line {}: {}", index + 1, e),
                    None,
                )
            })?;
            if read == 0 {
                break;
            }
            if index == 0 {
                self.transition(source_name, PipelineState::HeaderRead);
            }
            raw_lines.push(buffer);
        }

        let lines: Vec<String> = raw_lines
            .iter()
            .map(|raw| clean_header_line(&String::from_utf8_lossy(raw)).to_string())
            .collect();

        let Some((entry, index)) = HeaderMatcher::new(&self.registry).match_lines(&lines) else {
            return Ok(None);
        };

        let rest = raw_lines[index + 1..].concat();
        let header = HeaderMatch {
            entry: Arc::clone(entry),
            line: lines[index].clone(),
            index,
        };
        Ok(Some((header, rest)))
    }

    fn stream_rows<R: Read>(
        &self,
        reader: R,
        source_name: &str,
        header: &HeaderMatch,
        tagged_lines: &TaggedLineSet,
    ) -> Result<IngestOutcome> {
        let schema = header.entry.schema();
        let delimiter = if schema.is_discovered() {
            Delimiter::detect(&header.line)
        } else {
            schema.delimiter
        };

        let header_fields = split_header(&header.line, delimiter);
        let plan = if schema.is_discovered() {
            FieldPlan::discover(&header_fields)
        } else {
            header.entry.plan().clone()
        };

        let parser = RowParser::new(schema, &plan, &header_fields);
        let annotator = RecordAnnotator::new(&schema.kind, self.config.classification_mode);
        debug!(
            "{}: {} fields over {} header columns",
            source_name,
            plan.len(),
            parser.header_width()
        );

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter.as_byte())
            .from_reader(reader);

        self.transition(source_name, PipelineState::Streaming);

        let mut records: Vec<Record> = Vec::new();
        let mut row_errors = Vec::new();
        let mut stats = IngestStats {
            header_line: header.index + 1,
            ..IngestStats::new()
        };
        let mut consecutive_malformed = 0usize;
        let mut byte_record = ByteRecord::new();
        let separator = delimiter.as_char().to_string();

        loop {
            let last_good_line = records.last().map(Record::line).unwrap_or(0);
            match csv_reader.read_byte_record(&mut byte_record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    return Err(Error::parse(
                        source_name,
                        last_good_line,
                        format!("failed to read data row {}", stats.total_rows + 1),
                        Some(e),
                    ));
                }
            }

            stats.total_rows += 1;
            let row = stats.total_rows;
            let raw: Vec<String> = byte_record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            let result = if parser.header_width() > 1 && raw.len() == 1 {
                consecutive_malformed += 1;
                if consecutive_malformed >= self.config.max_consecutive_malformed {
                    return Err(Error::parse(
                        source_name,
                        last_good_line,
                        format!(
                            "{} consecutive rows cannot be mapped onto {} columns",
                            consecutive_malformed,
                            parser.header_width()
                        ),
                        None,
                    ));
                }
                Err(RowErrorKind::Malformed {
                    reason: format!("expected {} columns, found 1", parser.header_width()),
                })
            } else {
                consecutive_malformed = 0;
                parser.parse_row(&raw)
            };

            match result {
                Ok(mut record) => {
                    let line = match schema.line_numbering {
                        LineNumbering::Sequential => records.len() + 1,
                        LineNumbering::RawPosition => row,
                    };
                    annotator.annotate(&mut record, line, tagged_lines);
                    records.push(record);
                    stats.records_parsed += 1;
                }
                Err(kind) => {
                    let error = RowError {
                        row,
                        raw: raw.join(separator.as_str()),
                        kind,
                    };
                    self.sink.emit(&IngestEvent::RowRejected {
                        source: source_name.to_string(),
                        error: error.clone(),
                    });
                    row_errors.push(error);
                    stats.rows_rejected += 1;

                    if let Some(max) = self.config.max_row_errors {
                        if row_errors.len() > max {
                            return Err(Error::parse(
                                source_name,
                                last_good_line,
                                format!("more than {} row errors", max),
                                None,
                            ));
                        }
                    }
                }
            }
        }

        info!(
            "Ingested {} as '{}': {} records, {} row errors",
            source_name,
            schema.id,
            records.len(),
            row_errors.len()
        );

        Ok(IngestOutcome {
            schema_id: schema.id.clone(),
            columns: parser.columns(),
            records,
            row_errors,
            stats,
        })
    }

    fn transition(&self, source_name: &str, state: PipelineState) {
        self.sink.emit(&IngestEvent::StateChanged {
            source: source_name.to_string(),
            state,
        });
    }

    /// Report a file-level failure and hand the error back
    fn fail(&self, source_name: &str, error: Error) -> Error {
        self.sink.emit(&IngestEvent::Failed {
            source: source_name.to_string(),
            reason: error.to_string(),
        });
        self.transition(source_name, PipelineState::Failed);
        error
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))
}

/// Split a header line into column names, honouring CSV quoting
fn split_header(line: &str, delimiter: Delimiter) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(|field| field.to_string()).collect(),
        _ => line
            .split(delimiter.as_char())
            .map(|field| field.to_string())
            .collect(),
    }
}
