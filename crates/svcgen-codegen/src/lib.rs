//! NestJS gRPC client wrapper generation.
//!
//! Transforms ts-proto definition files (`*.types.ts`) into
//! promise-based NestJS client service classes (`*.service.ts`) using
//! bounded structural pattern extraction and Handlebars templates,
//! plus a migration pass that renames generated files while repairing
//! their cross-file imports.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod batch;
pub mod extract;
pub mod index;
pub mod migrate;
pub mod synth;
pub mod template_engine;

pub use batch::{BatchConfig, BatchGenerator, DEFAULT_EXCLUDED_NAMESPACES};
pub use extract::{CLIENT_MARKER, extract_service};
pub use index::IndexAggregator;
pub use migrate::Migrator;
pub use synth::{IndexEntry, Synthesizer};
