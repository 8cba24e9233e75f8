//! Schemas command: list every format the registry can recognise

use super::shared::build_pipeline;
use crate::Schema;
use crate::app::services::schema_registry::{Delimiter, SchemaKind, SchemaLayout};
use crate::cli::args::{OutputFormat, SchemasArgs};
use crate::config::IngestConfig;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

/// One row of the schema listing
#[derive(Debug, Serialize)]
struct SchemaSummary<'a> {
    id: &'a str,
    name: &'a str,
    delimiter: &'static str,
    kind: &'static str,
    fields: Option<usize>,
    header: Option<&'a str>,
}

impl<'a> From<&'a Schema> for SchemaSummary<'a> {
    fn from(schema: &'a Schema) -> Self {
        let fields = match &schema.layout {
            SchemaLayout::Fixed(fields) => Some(fields.len()),
            SchemaLayout::Discovered => None,
        };

        Self {
            id: &schema.id,
            name: &schema.name,
            delimiter: delimiter_name(schema.delimiter),
            kind: match schema.kind {
                SchemaKind::Standard => "standard",
                SchemaKind::Timeline(_) => "timeline",
            },
            fields,
            header: schema.header_variants.first().map(String::as_str),
        }
    }
}

fn delimiter_name(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Comma => "comma",
        Delimiter::Tab => "tab",
        Delimiter::Pipe => "pipe",
    }
}

/// Print the supported schemas in match priority order
pub fn run_schemas(args: SchemasArgs) -> Result<()> {
    let config = if args.generic_fallback {
        IngestConfig::default().with_generic_fallback()
    } else {
        IngestConfig::default()
    };
    let pipeline = build_pipeline(config)?;
    let schemas = pipeline.list_supported_schemas();
    let summaries: Vec<SchemaSummary> = schemas.iter().map(|s| SchemaSummary::from(*s)).collect();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries)
                .context("Failed to serialise schema list")?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", "Supported schemas".bright_green().bold());
            for summary in &summaries {
                let fields = summary
                    .fields
                    .map(|count| format!("{} fields", count))
                    .unwrap_or_else(|| "discovered".to_string());
                println!(
                    "  {:<36} {:<8} {:<6} {:<12} {}",
                    summary.id.bright_white().bold(),
                    summary.kind,
                    summary.delimiter,
                    fields,
                    summary.name.bright_cyan()
                );
            }
            println!("\n{} {}", "Total:".bright_cyan(), summaries.len());
        }
    }

    Ok(())
}
