//! cli
//!
//! Command-line interface layer for gooper.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration and the workspace
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds the real
//! toolchain and source-control backends, and hands them to the
//! [`crate::engine`] orchestrators.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use crate::engine;
use anyhow::Result;

/// Run an already parsed command line.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        config: cli.config.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    commands::dispatch(cli.command, &ctx)
}
