//! engine::fetch
//!
//! Fetcher / reverter: get a package's sources and force its working copy
//! to a pinned revision.
//!
//! # Integrity Contract
//!
//! - A revert never runs against a location derived from a malformed path
//! - Any revert failure names the package and the revision it was aiming for
//! - A hard reset discards local modifications; a warning is printed first

use crate::backend::{SourceControl, Toolchain};
use crate::core::paths::Workspace;
use crate::core::types::PackageRef;
use crate::git::ResetMode;
use crate::ui::output::{self, Verbosity};

use super::error::PinError;

/// Fetches packages and resets working copies.
pub struct Fetcher<'a> {
    toolchain: &'a dyn Toolchain,
    scm: &'a dyn SourceControl,
    workspace: &'a Workspace,
    reset: ResetMode,
    verbosity: Verbosity,
}

impl<'a> Fetcher<'a> {
    pub fn new(
        toolchain: &'a dyn Toolchain,
        scm: &'a dyn SourceControl,
        workspace: &'a Workspace,
        reset: ResetMode,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            toolchain,
            scm,
            workspace,
            reset,
            verbosity,
        }
    }

    /// Download the package's sources (no build).
    pub fn fetch(&self, pkg: &PackageRef) -> Result<(), PinError> {
        output::debug(format!("fetching {}", pkg.import_path()), self.verbosity);
        self.toolchain
            .fetch(pkg.import_path())
            .map_err(|source| PinError::Fetch {
                import_path: pkg.import_path().clone(),
                source,
            })
    }

    /// Force the package's working copy to `revision`.
    ///
    /// # Errors
    ///
    /// - [`PinError::RepoLocation`] if the import path is malformed
    /// - [`PinError::Revert`] for every other failure
    pub fn revert(&self, pkg: &PackageRef, revision: &str) -> Result<(), PinError> {
        let git_dir = self.workspace.metadata_dir(pkg.import_path())?;
        let revert_error = |source| PinError::Revert {
            import_path: pkg.import_path().clone(),
            revision: revision.to_string(),
            source,
        };

        let discards_changes = self.reset == ResetMode::Hard
            && self
                .scm
                .has_local_changes(&git_dir)
                .map_err(revert_error)?;
        if discards_changes {
            output::warn(
                format!(
                    "discarding local changes in {}",
                    git_dir.parent().unwrap_or(&git_dir).display()
                ),
                self.verbosity,
            );
        }

        output::debug(
            format!(
                "reset --{} {} in {}",
                self.reset,
                revision,
                git_dir.display()
            ),
            self.verbosity,
        );
        self.scm
            .reset(&git_dir, revision, self.reset)
            .map_err(revert_error)
    }

    /// Compile the package.
    pub fn build(&self, pkg: &PackageRef) -> Result<(), PinError> {
        output::debug(format!("building {}", pkg.import_path()), self.verbosity);
        self.toolchain
            .build(pkg.import_path())
            .map_err(|source| PinError::Build {
                import_path: pkg.import_path().clone(),
                source,
            })
    }
}
