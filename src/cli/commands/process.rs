//! Process command: parse one file, print its records and optionally export them

use super::shared::{build_pipeline, load_tagged_lines};
use crate::app::services::ingestion_pipeline::IngestStats;
use crate::app::services::record_export::RecordExporter;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::{IngestOutcome, Record, RowError};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tokio::task;
use tracing::info;

/// JSON document printed by `process --format json`
#[derive(Debug, Serialize)]
struct ProcessReport<'a> {
    source: String,
    schema_id: &'a str,
    stats: &'a IngestStats,
    records: &'a [Record],
    row_errors: &'a [RowError],
}

pub async fn run_process(args: ProcessArgs) -> Result<()> {
    args.validate()?;
    let config = args.ingest_config()?;
    let pipeline = build_pipeline(config)?;
    let tagged = load_tagged_lines(args.tagged.as_deref())?;

    let start_time = Instant::now();
    let file = args.file.clone();
    let outcome = task::spawn_blocking(move || pipeline.process_file(&file, &tagged))
        .await
        .context("Ingestion task panicked")?
        .with_context(|| format!("Failed to process {}", args.file.display()))?;
    info!(
        "Processed {} in {}ms",
        args.file.display(),
        start_time.elapsed().as_millis()
    );

    match args.format {
        OutputFormat::Json => print_json(&args, &outcome)?,
        OutputFormat::Table => print_table(&args, &outcome),
    }

    if let Some(export_path) = &args.export {
        let exporter = RecordExporter::for_path(export_path).with_compression(args.compression.into());
        let path = export_path.clone();
        let rows = task::spawn_blocking(move || exporter.write(&outcome, &path))
            .await
            .context("Export task panicked")?
            .with_context(|| format!("Failed to export to {}", export_path.display()))?;

        if args.format == OutputFormat::Table {
            println!(
                "  {} {} rows to {}",
                "Exported".bright_green(),
                rows.to_string().bright_white().bold(),
                export_path.display()
            );
        }
    }

    Ok(())
}

fn print_json(args: &ProcessArgs, outcome: &IngestOutcome) -> Result<()> {
    let report = ProcessReport {
        source: args.file.display().to_string(),
        schema_id: &outcome.schema_id,
        stats: &outcome.stats,
        records: &outcome.records,
        row_errors: &outcome.row_errors,
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialise records")?;
    println!("{}", json);
    Ok(())
}

fn print_table(args: &ProcessArgs, outcome: &IngestOutcome) {
    println!(
        "{} {} {}",
        "Schema:".bright_cyan(),
        outcome.schema_id.bright_white().bold(),
        format!("(header on line {})", outcome.stats.header_line).dimmed()
    );

    println!(
        "{}",
        format!("Line\tTag\tClass\t{}", outcome.columns.join("\t")).bold()
    );
    let shown = args.limit.unwrap_or(usize::MAX);
    for record in outcome.records.iter().take(shown) {
        let values: Vec<String> = record.values().iter().map(|v| v.to_string()).collect();
        let line = format!(
            "{}\t{}\t{}\t{}",
            record.line(),
            if record.tagged() { "*" } else { "" },
            record.classification().unwrap_or(""),
            values.join("\t")
        );
        if record.tagged() {
            println!("{}", line.bright_yellow());
        } else {
            println!("{}", line);
        }
    }
    if outcome.records.len() > shown {
        println!(
            "{}",
            format!("... {} more records", outcome.records.len() - shown).dimmed()
        );
    }

    if !outcome.row_errors.is_empty() {
        println!("\n{}", "Rejected rows".bright_red().bold());
        for error in &outcome.row_errors {
            println!("  {} {}", error.to_string().bright_red(), error.raw.dimmed());
        }
    }

    let stats = &outcome.stats;
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Rows read:".bright_cyan(),
        stats.total_rows.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.records_parsed.to_string().bright_white().bold()
    );
    if stats.rows_rejected > 0 {
        println!(
            "  {} {} ({:.1}% success)",
            "Rejected:".bright_red(),
            stats.rows_rejected.to_string().bright_red().bold(),
            stats.success_rate()
        );
    }
}
