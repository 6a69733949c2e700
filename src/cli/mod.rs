//! CLI arguments parsing
//!
//! This module handles command-line argument parsing for the replay tool
//! using clap's derive API.

pub mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments, exiting with a usage message on error.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
