//! Scan command: ingest many candidate files concurrently
//!
//! Every file runs through the pipeline on the blocking thread pool, with at
//! most `workers` files in flight. Unrecognised files are counted, not
//! treated as failures.

use super::shared::{build_pipeline, create_progress_bar, discover_input_files};
use crate::IngestionPipeline;
use crate::TaggedLineSet;
use crate::cli::args::{OutputFormat, ScanArgs};
use anyhow::{Context, Result};
use colored::*;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, warn};

/// Outcome of one scanned file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileResult {
    Ingested {
        path: PathBuf,
        schema_id: String,
        records: usize,
        rejected: usize,
    },
    Unrecognized {
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        reason: String,
    },
}

/// Per-schema totals
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaTotals {
    pub files: usize,
    pub records: usize,
    pub rejected: usize,
}

/// Aggregated results of a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub unrecognized: usize,
    pub failed: Vec<(PathBuf, String)>,
    pub by_schema: BTreeMap<String, SchemaTotals>,
    pub elapsed_ms: u128,
}

impl ScanSummary {
    fn add(&mut self, result: FileResult) {
        self.files_scanned += 1;
        match result {
            FileResult::Ingested {
                schema_id,
                records,
                rejected,
                ..
            } => {
                let totals = self.by_schema.entry(schema_id).or_default();
                totals.files += 1;
                totals.records += records;
                totals.rejected += rejected;
            }
            FileResult::Unrecognized { .. } => self.unrecognized += 1,
            FileResult::Failed { path, reason } => self.failed.push((path, reason)),
        }
    }

    pub fn total_records(&self) -> usize {
        self.by_schema.values().map(|t| t.records).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.by_schema.values().map(|t| t.rejected).sum()
    }
}

/// Ingest one file, classifying the outcome for the summary
pub fn scan_file(pipeline: &IngestionPipeline, path: PathBuf) -> FileResult {
    match pipeline.process_file(&path, &TaggedLineSet::new()) {
        Ok(outcome) => FileResult::Ingested {
            path,
            schema_id: outcome.schema_id,
            records: outcome.stats.records_parsed,
            rejected: outcome.stats.rows_rejected,
        },
        Err(e) if e.is_unrecognized() => {
            debug!("Skipping unrecognized file {}", path.display());
            FileResult::Unrecognized { path }
        }
        Err(e) => {
            warn!("Failed to ingest {}: {}", path.display(), e);
            FileResult::Failed {
                path,
                reason: e.to_string(),
            }
        }
    }
}

pub async fn run_scan(args: ScanArgs, show_progress: bool) -> Result<()> {
    let config = args.scan_config()?;
    let files = discover_input_files(&args.paths, &config)?;
    if files.is_empty() {
        anyhow::bail!("No candidate files found in {}", args.paths.join(", "));
    }

    let pipeline = Arc::new(build_pipeline(config.ingest.clone())?);
    let start_time = Instant::now();

    let progress = create_progress_bar(files.len() as u64, "Ingesting files");
    if !show_progress || args.format == OutputFormat::Json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let results: Vec<FileResult> = stream::iter(files)
        .map(|path| {
            let pipeline = Arc::clone(&pipeline);
            let progress = progress.clone();
            async move {
                let display = path.display().to_string();
                let result = task::spawn_blocking(move || scan_file(&pipeline, path))
                    .await
                    .with_context(|| format!("Ingestion task for {} panicked", display));
                progress.inc(1);
                result
            }
        })
        .buffer_unordered(config.workers)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<_>>()?;

    progress.finish_with_message("Scan complete");

    let mut summary = ScanSummary::default();
    for result in results {
        summary.add(result);
    }
    summary.failed.sort();
    summary.elapsed_ms = start_time.elapsed().as_millis();

    match args.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialise scan summary")?;
            println!("{}", json);
        }
        OutputFormat::Table => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    println!("\n{}", "Scan Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.elapsed_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files scanned:".bright_cyan(),
        summary.files_scanned.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Unrecognized:".bright_cyan(),
        summary.unrecognized.to_string().bright_white()
    );

    for (schema_id, totals) in &summary.by_schema {
        println!(
            "    {:<36} {:>5} files {:>9} records {:>6} rejected",
            schema_id.bright_white(),
            totals.files,
            totals.records,
            totals.rejected
        );
    }

    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        summary.total_records().to_string().bright_white().bold()
    );
    if summary.total_rejected() > 0 {
        println!(
            "  {} {}",
            "Rows rejected:".bright_yellow(),
            summary.total_rejected().to_string().bright_yellow()
        );
    }
    if !summary.failed.is_empty() {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            summary.failed.len().to_string().bright_red().bold()
        );
        for (path, reason) in &summary.failed {
            println!("    {} {}", path.display(), reason.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_file_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let skip = temp_dir.path().join("skip.csv");
        fs::write(&skip, "SourceFile,SourceFileSha1,Reason\nfoo.dat,ABCD,locked\n,EF01,gone\n")
            .unwrap();
        let unknown = temp_dir.path().join("unknown.csv");
        fs::write(&unknown, "Foo,Bar\n1,2\n").unwrap();
        let missing = temp_dir.path().join("missing.csv");

        let pipeline = build_pipeline(IngestConfig::default()).unwrap();

        let mut summary = ScanSummary::default();
        summary.add(scan_file(&pipeline, skip));
        summary.add(scan_file(&pipeline, unknown));
        summary.add(scan_file(&pipeline, missing));

        assert_eq!(summary.files_scanned, 3);
        assert_eq!(summary.unrecognized, 1);
        assert_eq!(summary.failed.len(), 1);

        let totals = &summary.by_schema["kape_skip_log"];
        assert_eq!(totals.files, 1);
        assert_eq!(totals.records, 1);
        assert_eq!(totals.rejected, 1);
        assert_eq!(summary.total_records(), 1);
    }

    #[tokio::test]
    async fn test_run_scan_over_directory() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..4 {
            fs::write(
                temp_dir.path().join(format!("skip{}.csv", i)),
                "SourceFile,SourceFileSha1,Reason\nfoo.dat,ABCD,locked\n",
            )
            .unwrap();
        }

        let args = ScanArgs {
            paths: vec![temp_dir.path().display().to_string()],
            workers: Some(2),
            no_recursive: false,
            extensions: None,
            generic_fallback: false,
            accumulate: false,
            format: OutputFormat::Json,
        };

        assert!(run_scan(args, false).await.is_ok());
    }
}
