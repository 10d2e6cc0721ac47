//! Migrate command implementation.
//!
//! Moves generated files from one role suffix to another, rewriting
//! sibling imports, and prints a report.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use svcgen_codegen::Migrator;
use svcgen_core::Role;
use svcgen_core::cli::{ExitCode, OutputFormat};
use tracing::info;

/// End-of-run report printed by the migrate command.
#[derive(Debug, Serialize)]
pub struct MigrateReport {
    /// Files moved to the new role suffix.
    pub migrated: usize,
    /// Files left untouched after a failed migration attempt.
    pub failed: usize,
    /// Root directory the migration ran over.
    pub root: String,
}

/// Runs the migrate command.
///
/// # Errors
///
/// Returns an error if the roles are invalid, the root cannot be
/// walked, or report formatting fails. Per-file failures are counted
/// in the report and surface through the exit code instead.
pub fn run(root: PathBuf, from: Role, to: Role, output_format: OutputFormat) -> Result<ExitCode> {
    info!(root = %root.display(), %from, %to, "starting migration");

    let summary = Migrator::new(root.clone(), from, to)?
        .run()
        .context("migration batch failed")?;

    let report = MigrateReport {
        migrated: summary.migrated,
        failed: summary.failed,
        root: root.display().to_string(),
    };
    println!("{}", format_output(&report, output_format)?);

    if summary.has_failures() {
        Ok(ExitCode::ERROR)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
