//! Generate command implementation.
//!
//! Runs the batch generator over a definition tree and then the index
//! aggregator over its output, printing a combined report.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use svcgen_codegen::{BatchConfig, BatchGenerator, IndexAggregator};
use svcgen_core::Role;
use svcgen_core::cli::{ExitCode, OutputFormat};
use tracing::info;

/// End-of-run report printed by the generate command.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Wrapper files written.
    pub generated: usize,
    /// Candidate files skipped as "not a service file".
    pub skipped: usize,
    /// Files that hit a fatal per-file error.
    pub failed: usize,
    /// Entries written into the barrel index.
    pub index_entries: usize,
    /// Directory the wrappers were written to.
    pub out_dir: String,
}

/// Runs the generate command.
///
/// Generates one wrapper per service definition file, then rebuilds
/// the `index.ts` barrel covering every wrapper in the output
/// directory.
///
/// # Errors
///
/// Returns an error for unrecoverable setup failures (unreadable
/// definition tree, uncreatable output directory) or if report
/// formatting fails. Per-file failures are counted in the report and
/// surface through the exit code instead.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    types_dir: PathBuf,
    out_dir: PathBuf,
    import_prefix: String,
    source_role: Role,
    wrapper_role: Role,
    exclude: Vec<String>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!(
        types_dir = %types_dir.display(),
        out_dir = %out_dir.display(),
        "starting generation"
    );

    let config = BatchConfig {
        types_dir,
        out_dir: out_dir.clone(),
        import_prefix,
        source_role,
        wrapper_role: wrapper_role.clone(),
        excluded_namespaces: exclude,
    };

    let summary = BatchGenerator::new(config)?
        .run()
        .context("generation batch failed")?;

    let index_entries = IndexAggregator::new(out_dir.clone(), wrapper_role)?
        .run()
        .context("index aggregation failed")?;

    let report = GenerateReport {
        generated: summary.generated,
        skipped: summary.skipped,
        failed: summary.failed,
        index_entries,
        out_dir: out_dir.display().to_string(),
    };
    println!("{}", format_output(&report, output_format)?);

    if summary.has_failures() {
        Ok(ExitCode::ERROR)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
