//! Export of parsed records to Parquet or CSV
//!
//! Records are converted column by column into a polars `DataFrame`. The
//! annotation columns `Line`, `Tagged` and `Classification` come first,
//! followed by the schema's output fields with their typed values.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use polars::prelude::{
    CsvWriter, DataFrame, DataType, IntoColumn, NamedFrom, ParquetCompression,
    ParquetWriter, SerWriter, Series, TimeUnit,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::models::{FieldValue, Record};
use crate::app::services::ingestion_pipeline::IngestOutcome;
use crate::{Error, Result};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Parquet,
    Csv,
    Tsv,
}

impl ExportFormat {
    /// Pick a format from a file extension (Parquet unless `.csv` or `.tsv`)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("csv") => ExportFormat::Csv,
            Some("tsv") => ExportFormat::Tsv,
            _ => ExportFormat::Parquet,
        }
    }
}

/// Compression algorithms for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportCompression {
    #[default]
    Snappy,
    Zstd,
    Lz4,
    Uncompressed,
}

impl ExportCompression {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            ExportCompression::Snappy => ParquetCompression::Snappy,
            ExportCompression::Zstd => ParquetCompression::Zstd(None),
            ExportCompression::Lz4 => ParquetCompression::Lz4Raw,
            ExportCompression::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Writes ingestion results to disk
#[derive(Debug, Clone, Copy)]
pub struct RecordExporter {
    format: ExportFormat,
    compression: ExportCompression,
}

impl RecordExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            compression: ExportCompression::default(),
        }
    }

    /// Exporter whose format follows the output path's extension
    pub fn for_path(path: &Path) -> Self {
        Self::new(ExportFormat::from_path(path))
    }

    pub fn with_compression(mut self, compression: ExportCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Write an outcome's records; returns the number of rows written
    pub fn write(&self, outcome: &IngestOutcome, path: &Path) -> Result<usize> {
        let mut df = records_to_dataframe(&outcome.columns, &outcome.records)?;
        let rows = df.height();

        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        match self.format {
            ExportFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(self.compression.to_polars_compression())
                    .finish(&mut df)
                    .map_err(|e| Error::export(format!("Failed to write {}", path.display()), e))?;
            }
            ExportFormat::Csv | ExportFormat::Tsv => {
                let separator = if self.format == ExportFormat::Tsv { b'\t' } else { b',' };
                CsvWriter::new(file)
                    .include_header(true)
                    .with_separator(separator)
                    .finish(&mut df)
                    .map_err(|e| Error::export(format!("Failed to write {}", path.display()), e))?;
            }
        }

        info!(
            "Exported {} records ({}) to {}",
            rows,
            outcome.schema_id,
            path.display()
        );
        Ok(rows)
    }
}

/// Column type chosen from the values present in a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ColumnKind {
    Text,
    Int,
    Long,
    UnsignedLong,
    Float,
    Bool,
    DateTime,
    TimeSpan,
}

impl ColumnKind {
    fn of(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Null => None,
            FieldValue::Text(_) => Some(ColumnKind::Text),
            FieldValue::Int(_) => Some(ColumnKind::Int),
            FieldValue::Long(_) => Some(ColumnKind::Long),
            FieldValue::UnsignedLong(_) => Some(ColumnKind::UnsignedLong),
            FieldValue::Float(_) => Some(ColumnKind::Float),
            FieldValue::Bool(_) => Some(ColumnKind::Bool),
            FieldValue::DateTime(_) => Some(ColumnKind::DateTime),
            FieldValue::TimeSpan(_) => Some(ColumnKind::TimeSpan),
        }
    }
}

/// Build a DataFrame from records sharing one set of output columns
pub fn records_to_dataframe(columns: &[String], records: &[Record]) -> Result<DataFrame> {
    let mut frame_columns = Vec::with_capacity(columns.len() + 3);

    let lines: Vec<u64> = records.iter().map(|r| r.line() as u64).collect();
    let tagged: Vec<bool> = records.iter().map(Record::tagged).collect();
    let classification: Vec<Option<String>> = records
        .iter()
        .map(|r| r.classification().map(str::to_string))
        .collect();

    frame_columns.push(Series::new("Line".into(), lines).into_column());
    frame_columns.push(Series::new("Tagged".into(), tagged).into_column());
    frame_columns.push(Series::new("Classification".into(), classification).into_column());

    for (index, name) in columns.iter().enumerate() {
        let values: Vec<&FieldValue> = records
            .iter()
            .map(|record| record.values().get(index).unwrap_or(&FieldValue::Null))
            .collect();
        frame_columns.push(build_series(name, &values)?.into_column());
    }

    let df = DataFrame::new(frame_columns)?;
    debug!("Built DataFrame with {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

fn build_series(name: &str, values: &[&FieldValue]) -> Result<Series> {
    let kinds: HashSet<ColumnKind> = values.iter().filter_map(|v| ColumnKind::of(v)).collect();
    let kind = match kinds.len() {
        1 => kinds.into_iter().next().unwrap_or(ColumnKind::Text),
        _ => ColumnKind::Text,
    };

    let series = match kind {
        ColumnKind::Text => {
            let data: Vec<Option<String>> = values
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect();
            Series::new(name.into(), data)
        }
        ColumnKind::Int => {
            let data: Vec<Option<i32>> = values
                .iter()
                .map(|v| match v {
                    FieldValue::Int(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), data)
        }
        ColumnKind::Long => {
            let data: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
            Series::new(name.into(), data)
        }
        ColumnKind::UnsignedLong => {
            let data: Vec<Option<u64>> = values
                .iter()
                .map(|v| match v {
                    FieldValue::UnsignedLong(value) => Some(*value),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), data)
        }
        ColumnKind::Float => {
            let data: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
            Series::new(name.into(), data)
        }
        ColumnKind::Bool => {
            let data: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
            Series::new(name.into(), data)
        }
        ColumnKind::DateTime => {
            let data: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.as_datetime().map(|dt| dt.timestamp_micros()))
                .collect();
            Series::new(name.into(), data)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        }
        ColumnKind::TimeSpan => {
            let data: Vec<Option<i64>> = values
                .iter()
                .map(|v| match v {
                    FieldValue::TimeSpan(span) => span.num_microseconds(),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), data).cast(&DataType::Duration(TimeUnit::Microseconds))?
        }
    };

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::TaggedLineSet;
    use crate::app::services::schema_registry::SchemaRegistry;
    use crate::IngestionPipeline;
    use chrono::{TimeDelta, TimeZone, Utc};
    use polars::prelude::{ParquetReader, SerReader};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn columns(names: &[&str]) -> Arc<[String]> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn skip_log_outcome() -> IngestOutcome {
        let pipeline = IngestionPipeline::new(Arc::new(SchemaRegistry::builtin().unwrap()));
        let data = "SourceFile,SourceFileSha1,Reason\nfoo.dat,ABCD,not found\nbar.dat,EF01,locked\n";
        let tagged: TaggedLineSet = [2].into_iter().collect();
        pipeline
            .process_reader(data.as_bytes(), "skip.csv", &tagged)
            .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("OUT.TSV")), ExportFormat::Tsv);
        assert_eq!(ExportFormat::from_path(Path::new("out.parquet")), ExportFormat::Parquet);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Parquet);
    }

    #[test]
    fn test_typed_columns() {
        let when = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let cols = columns(&["Name", "Size", "When", "Took", "Seen"]);
        let record = Record::new(
            cols.clone(),
            vec![
                FieldValue::Text("a".to_string()),
                FieldValue::Long(42),
                FieldValue::DateTime(when),
                FieldValue::TimeSpan(TimeDelta::seconds(90)),
                FieldValue::Null,
            ],
        );

        let df = records_to_dataframe(&cols, &[record]).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 8);
        assert_eq!(df.column("Size").unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            df.column("When").unwrap().dtype(),
            &DataType::Datetime(TimeUnit::Microseconds, None)
        );
        assert_eq!(
            df.column("Took").unwrap().dtype(),
            &DataType::Duration(TimeUnit::Microseconds)
        );
        assert_eq!(df.column("Seen").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Seen").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_outcome_builds_empty_frame() {
        let df = records_to_dataframe(&columns(&["Name"]), &[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_write_parquet_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skip.parquet");
        let outcome = skip_log_outcome();

        let rows = RecordExporter::for_path(&path).write(&outcome, &path).unwrap();
        assert_eq!(rows, 2);

        let df = ParquetReader::new(File::open(&path).unwrap()).finish().unwrap();
        assert_eq!(df.height(), 2);
        let tagged = df.column("Tagged").unwrap().bool().unwrap();
        assert_eq!(tagged.get(0), Some(false));
        assert_eq!(tagged.get(1), Some(true));
    }

    #[test]
    fn test_write_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skip.csv");
        let outcome = skip_log_outcome();

        let exporter = RecordExporter::for_path(&path);
        assert_eq!(exporter.format(), ExportFormat::Csv);
        exporter.write(&outcome, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Line,Tagged,Classification,SourceFile,SourceFileSha1,Reason")
        );
        assert_eq!(lines.next(), Some("1,false,,foo.dat,ABCD,not found"));
    }

    #[test]
    fn test_write_tsv_uses_tabs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skip.tsv");
        let outcome = skip_log_outcome();

        let exporter = RecordExporter::for_path(&path);
        assert_eq!(exporter.format(), ExportFormat::Tsv);
        exporter.write(&outcome, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Line\tTagged\tClassification\tSourceFile\tSourceFileSha1\tReason")
        );
        assert_eq!(lines.next(), Some("1\tfalse\t\tfoo.dat\tABCD\tnot found"));
    }
}
