//! Intcode CLI Library
//!
//! Argument parsing, configuration loading and subcommands for the `intcode`
//! binary.

pub mod args;
pub mod commands;
pub mod config;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
