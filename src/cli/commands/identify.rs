//! Identify command: report which schema claims a file's header

use super::shared::build_pipeline;
use crate::cli::args::IdentifyArgs;
use anyhow::{Context, Result};
use colored::*;

pub fn run_identify(args: IdentifyArgs) -> Result<()> {
    let pipeline = build_pipeline(args.ingest_config())?;
    let schema_id = pipeline
        .identify_file(&args.file)
        .with_context(|| format!("Failed to read header of {}", args.file.display()))?;

    match schema_id {
        Some(id) => println!("{}", id.bright_green()),
        None => println!("{}", "unrecognized".bright_red()),
    }
    Ok(())
}
