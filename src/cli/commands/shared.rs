//! Shared components for CLI commands
//!
//! Logging setup, pipeline construction, tagged line loading and input file
//! discovery used by more than one command.

use crate::cli::args::Args;
use crate::config::{IngestConfig, ScanConfig};
use crate::{IngestionPipeline, SchemaRegistry, TaggedLineSet};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("timeline_ingest={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Build a pipeline over the built-in schema catalog
pub fn build_pipeline(config: IngestConfig) -> Result<IngestionPipeline> {
    let registry =
        SchemaRegistry::from_config(&config).context("Failed to build the schema registry")?;
    IngestionPipeline::new(Arc::new(registry))
        .with_config(config)
        .context("Invalid ingestion settings")
}

/// Read the previously tagged line numbers, if a file was given
pub fn load_tagged_lines(path: Option<&Path>) -> Result<TaggedLineSet> {
    let Some(path) = path else {
        return Ok(TaggedLineSet::new());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tagged lines from {}", path.display()))?;
    let tagged = TaggedLineSet::parse_list(&text)
        .with_context(|| format!("Invalid tagged line file {}", path.display()))?;

    debug!("Loaded {} tagged lines from {}", tagged.len(), path.display());
    Ok(tagged)
}

/// Expand files, directories and glob patterns into candidate input files
///
/// Directories are walked (recursively unless disabled) and filtered by
/// extension; explicitly named files and glob matches are always included.
/// The result is sorted and free of duplicates.
pub fn discover_input_files(inputs: &[String], config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        if is_glob_pattern(input) {
            let entries =
                glob::glob(input).with_context(|| format!("Invalid glob pattern '{}'", input))?;
            for entry in entries {
                let path = entry.with_context(|| format!("Failed to expand '{}'", input))?;
                if path.is_file() {
                    files.insert(path);
                }
            }
            continue;
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            walk_directory(&path, config, &mut files)?;
        } else if path.is_file() {
            files.insert(path);
        } else {
            anyhow::bail!("Input path does not exist: {}", path.display());
        }
    }

    debug!("Discovered {} candidate files", files.len());
    Ok(files.into_iter().collect())
}

fn walk_directory(root: &Path, config: &ScanConfig, files: &mut BTreeSet<PathBuf>) -> Result<()> {
    let mut walker = WalkDir::new(root).follow_links(false);
    if !config.recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let accepted = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| config.accepts_extension(ext));
        if accepted {
            files.insert(entry.into_path());
        }
    }

    Ok(())
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "a,b\n1,2\n").unwrap();
        path
    }

    #[test]
    fn test_discover_directory_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let csv = touch(temp_dir.path(), "one.csv");
        let nested = touch(temp_dir.path(), "sub/two.TSV");
        touch(temp_dir.path(), "notes.md");

        let config = ScanConfig::default();
        let files = discover_input_files(
            &[temp_dir.path().display().to_string()],
            &config,
        )
        .unwrap();
        assert_eq!(files, vec![csv.clone(), nested]);

        let shallow = discover_input_files(
            &[temp_dir.path().display().to_string()],
            &config.without_recursion(),
        )
        .unwrap();
        assert_eq!(shallow, vec![csv]);
    }

    #[test]
    fn test_discover_glob_and_explicit_files() {
        let temp_dir = TempDir::new().unwrap();
        let a = touch(temp_dir.path(), "a.csv");
        let b = touch(temp_dir.path(), "b.csv");
        let notes = touch(temp_dir.path(), "notes.md");

        let pattern = temp_dir.path().join("*.csv").display().to_string();
        let files = discover_input_files(
            &[pattern, notes.display().to_string(), a.display().to_string()],
            &ScanConfig::default(),
        )
        .unwrap();

        assert_eq!(files, vec![a, b, notes]);
    }

    #[test]
    fn test_discover_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.csv").display().to_string();
        assert!(discover_input_files(&[missing], &ScanConfig::default()).is_err());
    }

    #[test]
    fn test_load_tagged_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tags.txt");
        fs::write(&path, "1, 4\n9\n").unwrap();

        let tagged = load_tagged_lines(Some(&path)).unwrap();
        assert_eq!(tagged.len(), 3);
        assert!(tagged.contains(4));
        assert!(load_tagged_lines(None).unwrap().is_empty());

        fs::write(&path, "1,x").unwrap();
        assert!(load_tagged_lines(Some(&path)).is_err());
    }

    #[test]
    fn test_build_pipeline_with_fallback() {
        let plain = build_pipeline(IngestConfig::default()).unwrap();
        let fallback = build_pipeline(IngestConfig::default().with_generic_fallback()).unwrap();
        assert_eq!(
            fallback.list_supported_schemas().len(),
            plain.list_supported_schemas().len() + 1
        );
    }
}
