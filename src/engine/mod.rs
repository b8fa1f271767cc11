//! engine
//!
//! Pinning operations and the command orchestrators built on them.
//!
//! # Architecture
//!
//! ```text
//! install ─┬─ Fetcher (fetch, revert)
//!          └─ RevisionInspector
//! freeze ──── Discoverer ── RevisionInspector
//! build ───── Fetcher (build)
//! ```
//!
//! Every component talks to the outside world only through the
//! [`Toolchain`](crate::backend::Toolchain) and
//! [`SourceControl`](crate::backend::SourceControl) traits, and carries its
//! [`Verbosity`] explicitly.
//!
//! # Invariants
//!
//! - A revert never runs against a location derived from a malformed path
//! - Install reverts only packages whose current revision differs from the pin
//! - Freeze output follows the toolchain's dependency order
//! - The first fatal failure stops the operation; nothing is rolled back

pub mod build;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod freeze;
pub mod inspect;
pub mod install;

pub use build::build_all;
pub use discover::{filter_hosted, parse_dep_list, Discoverer};
pub use error::{DiscoveryError, PinError};
pub use fetch::Fetcher;
pub use freeze::{freeze, render_frozen, render_json, FrozenFormat};
pub use inspect::RevisionInspector;
pub use install::{InstallReport, Installer};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Explicit global config file.
    pub config: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output, toolchain stdout discarded).
    pub quiet: bool,
    /// Echo toolchain stdout regardless of configuration.
    pub verbose: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Whether toolchain stdout is echoed, given the configured default.
    ///
    /// `--quiet` always discards it and `--verbose` always echoes it.
    pub fn echo_toolchain(&self, configured: bool) -> bool {
        if self.quiet {
            false
        } else if self.verbose {
            true
        } else {
            configured
        }
    }

    /// The directory commands run in.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
