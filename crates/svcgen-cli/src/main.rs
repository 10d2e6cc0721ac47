//! svcgen CLI.
#![allow(clippy::unnecessary_wraps)] // API design requires Result for consistency across commands
//!
//! Command-line interface for generating NestJS gRPC client wrappers
//! from ts-proto definition files and migrating generated trees
//! between role suffixes.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Generate wrapper classes and the barrel index
//! - `migrate` - Move files between role suffixes, rewriting imports
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Generate wrappers for every service definition under src/types
//! svcgen generate --types-dir src/types --out-dir src/services
//!
//! # Move generated files from the service role to the types role
//! svcgen migrate --root src/generated --from service --to types
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use svcgen_core::Role;
use svcgen_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
pub mod formatters;

/// svcgen - NestJS gRPC client wrapper generator.
///
/// Turns ts-proto definition files into promise-based NestJS client
/// wrapper classes, keeps the barrel index in sync, and migrates
/// generated trees between file-role conventions.
#[derive(Parser, Debug)]
#[command(name = "svcgen")]
#[command(version, about, long_about = None)]
#[command(author = "GameHub Platform Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate wrapper classes from ts-proto definition files.
    ///
    /// Scans the definition tree for files declaring a gRPC client
    /// interface, writes one `@Injectable()` wrapper class per
    /// service, and rebuilds the `index.ts` barrel for the output
    /// directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Default layout: ./types in, ./services out
    /// svcgen generate
    ///
    /// # Explicit directories and an extra vendor exclusion
    /// svcgen generate --types-dir src/types --out-dir src/services \
    ///     --exclude google/protobuf --exclude internal/debug
    /// ```
    Generate {
        /// Directory searched for definition files
        #[arg(long, default_value = "types")]
        types_dir: PathBuf,

        /// Directory wrapper files are written to (created if absent)
        #[arg(long, default_value = "services")]
        out_dir: PathBuf,

        /// Import prefix from the output directory back to the
        /// definition files
        #[arg(long, default_value = "../types")]
        import_prefix: String,

        /// Role suffix of the definition files
        #[arg(long, default_value = "types")]
        source_role: Role,

        /// Role suffix given to generated wrappers
        #[arg(long, default_value = "service")]
        wrapper_role: Role,

        /// Namespace path fragments excluded from generation
        /// (default: google/protobuf)
        #[arg(long = "exclude", num_args = 1)]
        exclude: Vec<String>,
    },

    /// Migrate generated files between role suffixes.
    ///
    /// Renames every `.<from>.ts` file under the root to `.<to>.ts`
    /// and rewrites relative imports between siblings. Each new file
    /// is written before its original is deleted.
    ///
    /// # Examples
    ///
    /// ```bash
    /// svcgen migrate --root src/generated --from service --to types
    /// ```
    Migrate {
        /// Root directory the migration runs over
        #[arg(long)]
        root: PathBuf,

        /// Role suffix to migrate away from
        #[arg(long, default_value = "service")]
        from: Role,

        /// Role suffix to migrate to
        #[arg(long, default_value = "types")]
        to: Role,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = execute_command(cli.command, output_format)?;

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// Sets up tracing with appropriate log levels based on the verbosity
/// flag, writing to stderr so stdout stays clean for reports and
/// completion scripts.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit
/// code.
///
/// # Errors
///
/// Returns an error if command execution fails.
fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            types_dir,
            out_dir,
            import_prefix,
            source_role,
            wrapper_role,
            exclude,
        } => {
            let exclude = if exclude.is_empty() {
                svcgen_codegen::DEFAULT_EXCLUDED_NAMESPACES
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            } else {
                exclude
            };
            commands::generate::run(
                types_dir,
                out_dir,
                import_prefix,
                source_role,
                wrapper_role,
                exclude,
                output_format,
            )
        }
        Commands::Migrate { root, from, to } => {
            commands::migrate::run(root, from, to, output_format)
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
