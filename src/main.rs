use clap::{CommandFactory, Parser};
use std::process;
use timeline_ingest::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // Without a subcommand, show help rather than failing
    if args.command.is_none() {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print help: {}", e);
        }
        println!();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                match signal {
                    Ok(()) => Err(anyhow::anyhow!("Interrupted by user")),
                    Err(e) => Err(anyhow::anyhow!("Failed to listen for CTRL+C: {}", e)),
                }
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
