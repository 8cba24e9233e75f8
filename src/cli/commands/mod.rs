//! Command implementations for the timeline-ingest CLI
//!
//! Each command is implemented in its own module:
//! - `schemas`: list the recognised formats
//! - `identify`: match a single file's header
//! - `process`: parse one file, print and optionally export its records
//! - `scan`: concurrent ingestion of many files with a summary

pub mod identify;
pub mod process;
pub mod scan;
pub mod schemas;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Dispatch to the selected subcommand
///
/// Logging is initialised here, once, before the command runs.
pub async fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args);
    let show_progress = args.show_progress();

    let Some(command) = args.command else {
        anyhow::bail!("No command given; run with --help for usage");
    };

    match command {
        Commands::Schemas(schemas_args) => schemas::run_schemas(schemas_args),
        Commands::Identify(identify_args) => identify::run_identify(identify_args),
        Commands::Process(process_args) => process::run_process(process_args).await,
        Commands::Scan(scan_args) => scan::run_scan(scan_args, show_progress).await,
    }
}
