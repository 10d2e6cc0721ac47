//! Core types for the gRPC client wrapper generator.
//!
//! Shared domain types, the workspace error taxonomy, and CLI value
//! types used by both the code generator and the command-line binary.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod cli;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    GenerationSummary, MethodSignature, MigrationSummary, Role, ServiceConstant, ServiceDescriptor,
};
