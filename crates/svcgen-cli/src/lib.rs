//! svcgen CLI library.
//!
//! Exposes the command handlers and output formatters so they can be
//! tested and reused outside the binary entry point.

#![allow(clippy::unnecessary_wraps)]

pub mod commands;
pub mod formatters;
