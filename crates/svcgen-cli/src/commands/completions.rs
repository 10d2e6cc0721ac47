//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;
use svcgen_core::cli::ExitCode;
use tracing::info;

/// Generates a completion script for the specified shell.
///
/// Prints the script to stdout, where it can be sourced or saved to
/// the shell's completion directory.
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    info!("Generating {} completions", shell);
    generate(shell, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Runs the completions command.
///
/// # Errors
///
/// Never fails; the `Result` keeps the signature uniform with the
/// other commands.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd);
    Ok(ExitCode::SUCCESS)
}
