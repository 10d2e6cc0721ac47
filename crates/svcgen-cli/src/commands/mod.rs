//! CLI command implementations.
//!
//! Each submodule contains the implementation of one CLI subcommand.
//! Commands take parsed arguments, call into `svcgen-codegen`, and
//! print a report through the formatters.

pub mod completions;
pub mod generate;
pub mod migrate;
