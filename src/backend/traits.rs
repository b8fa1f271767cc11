//! backend::traits
//!
//! The narrow interfaces gooper uses to reach the Go toolchain and source
//! control.
//!
//! # Design
//!
//! Every external invocation is a blocking call behind one of two traits:
//!
//! - [`Toolchain`]: fetch sources, build a package, list dependencies
//! - [`SourceControl`]: read a working copy's HEAD, force it to a revision
//!
//! Engine code only ever sees `&dyn Toolchain` / `&dyn SourceControl`, so
//! tests substitute [`super::mock::MockBackend`] and never spawn `go` or
//! touch a real repository.
//!
//! There are no timeouts: a child process that hangs hangs the caller.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::core::types::ImportPath;
use crate::git::{GitError, ResetMode};

/// Errors from backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The program could not be started at all.
    #[error("failed to run '{program}'")]
    Spawn {
        /// The program that was invoked
        program: String,
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("'{command}' {status}")]
    Failed {
        /// The command line that was run
        command: String,
        /// How it ended
        status: ExitDescription,
    },

    /// The program succeeded but printed something we cannot use.
    #[error("unreadable output from '{command}': {message}")]
    InvalidOutput { command: String, message: String },

    /// A git operation failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// How a child process ended, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDescription {
    /// Exited with a non-zero code.
    Code(i32),
    /// Killed by a signal (no exit code).
    Signal,
}

impl From<ExitStatus> for ExitDescription {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitDescription::Code(code),
            None => ExitDescription::Signal,
        }
    }
}

impl std::fmt::Display for ExitDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitDescription::Code(code) => write!(f, "exited with status {}", code),
            ExitDescription::Signal => write!(f, "was terminated by a signal"),
        }
    }
}

/// The language toolchain (`go`).
pub trait Toolchain {
    /// Download a package's sources into the workspace without building.
    fn fetch(&self, import_path: &ImportPath) -> Result<(), BackendError>;

    /// Compile a package.
    fn build(&self, import_path: &ImportPath) -> Result<(), BackendError>;

    /// List the transitive dependencies of the given entry files.
    ///
    /// Returns the raw text, one bracketed, space-separated list per
    /// package, e.g. `[fmt github.com/acme/widget]`.
    fn list_deps(&self, entry_files: &[PathBuf]) -> Result<String, BackendError>;
}

/// Source control over a working copy, addressed by its metadata directory.
pub trait SourceControl {
    /// The revision HEAD currently points at.
    fn head_revision(&self, git_dir: &Path) -> Result<String, BackendError>;

    /// Force the working copy to `revision`.
    fn reset(&self, git_dir: &Path, revision: &str, mode: ResetMode) -> Result<(), BackendError>;

    /// Whether tracked files have uncommitted modifications.
    fn has_local_changes(&self, git_dir: &Path) -> Result<bool, BackendError>;
}
