//! backend::git
//!
//! [`SourceControl`] implementation over [`crate::git::Git`].

use std::path::Path;

use super::traits::{BackendError, SourceControl};
use crate::git::{Git, ResetMode};

/// Source control backed by libgit2.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitSourceControl;

impl GitSourceControl {
    pub fn new() -> Self {
        Self
    }
}

impl SourceControl for GitSourceControl {
    fn head_revision(&self, git_dir: &Path) -> Result<String, BackendError> {
        Ok(Git::open(git_dir)?.head_revision()?)
    }

    fn reset(&self, git_dir: &Path, revision: &str, mode: ResetMode) -> Result<(), BackendError> {
        Ok(Git::open(git_dir)?.reset_to(revision, mode)?)
    }

    fn has_local_changes(&self, git_dir: &Path) -> Result<bool, BackendError> {
        Ok(Git::open(git_dir)?.is_dirty()?)
    }
}
