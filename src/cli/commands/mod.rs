//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the workspace and settings through [`Session`]
//! 2. Calls the engine to execute the command
//! 3. Writes results to stdout
//!
//! `GOPATH` is checked before anything else, so a missing workspace fails
//! without touching configuration, manifests or the toolchain.

mod build;
mod completion;
mod freeze;
mod install;

// Re-export command functions for testing and direct invocation
pub use build::build;
pub use completion::completion;
pub use freeze::freeze;
pub use install::install;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::backend::{GitSourceControl, GoToolchain};
use crate::cli::args::Command;
use crate::core::config::{Config, Settings};
use crate::core::paths::Workspace;
use crate::engine::Context;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Install { manifest } => install::install(ctx, manifest.as_deref()),
        Command::Freeze {
            entry_files,
            json,
            output,
        } => freeze::freeze(ctx, &entry_files, json, output.as_deref()),
        Command::Build { manifest } => build::build(ctx, manifest.as_deref()),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Everything a workspace command needs, resolved once.
pub(crate) struct Session {
    pub workspace: Workspace,
    pub settings: Settings,
    pub dir: PathBuf,
    pub toolchain: GoToolchain,
    pub scm: GitSourceControl,
}

impl Session {
    /// Resolve the workspace, configuration and backends.
    pub fn open(ctx: &Context) -> Result<Self> {
        let workspace = Workspace::from_env()?;
        let dir = ctx
            .working_dir()
            .context("failed to determine working directory")?;
        let config = Config::load(ctx.config.as_deref(), Some(&dir))?;
        let settings = config.settings();

        let verbosity = ctx.verbosity();
        output::debug(
            format!("workspace root: {}", workspace.root().display()),
            verbosity,
        );
        if let Some(path) = config.global_config_loaded_from() {
            output::debug(format!("global config: {}", path.display()), verbosity);
        }
        if let Some(path) = config.project_config_loaded_from() {
            output::debug(format!("project config: {}", path.display()), verbosity);
        }

        let toolchain = GoToolchain::new(
            settings.go.clone(),
            ctx.echo_toolchain(settings.verbose),
        );

        Ok(Self {
            workspace,
            settings,
            dir,
            toolchain,
            scm: GitSourceControl::new(),
        })
    }

    /// The manifest to read: the argument, else the configured default,
    /// relative to the working directory.
    pub fn manifest_path(&self, arg: Option<&Path>) -> PathBuf {
        self.dir.join(arg.unwrap_or(&self.settings.manifest))
    }
}
