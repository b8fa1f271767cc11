//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! gooper. All working-copy reads and resets flow through [`Git`], which
//! normalizes git2 errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: No repository at the metadata path
//! - [`GitError::UnbornHead`]: Repository has no commits yet
//! - [`GitError::RevisionNotFound`]: Revision does not resolve to a commit
//! - [`GitError::Locked`]: Index or ref lock held by another process
//!
//! # Example
//!
//! ```ignore
//! use gooper::git::{Git, ResetMode};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("/go/src/github.com/acme/widget/.git"))?;
//! let head = git.head_revision()?;
//! git.reset_to("0123abcd", ResetMode::Hard)?;
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository at the given path.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// HEAD points at a branch with no commits.
    #[error("repository has no commits: {path}")]
    UnbornHead {
        /// The metadata path of the repository
        path: PathBuf,
    },

    /// Revision does not name a commit.
    #[error("revision not found: {revision}")]
    RevisionNotFound {
        /// The revision that failed to resolve
        revision: String,
    },

    /// Repository is bare, so there is no working tree to reset.
    #[error("bare repository not supported")]
    BareRepo,

    /// A lock file is held.
    #[error("repository is locked: {message}")]
    Locked {
        /// Description from git2
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::InvalidSpec
            | git2::ErrorCode::Ambiguous => GitError::RevisionNotFound {
                revision: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::Locked {
                message: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// How far a reset reaches.
///
/// # Example
///
/// ```
/// use gooper::git::ResetMode;
///
/// assert_eq!(ResetMode::default(), ResetMode::Hard);
/// assert_eq!(ResetMode::Mixed.to_string(), "mixed");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    /// Move HEAD, the index and the working tree.
    #[default]
    Hard,
    /// Move HEAD and the index; leave the working tree alone.
    Mixed,
}

impl ResetMode {
    fn to_git2(self) -> git2::ResetType {
        match self {
            ResetMode::Hard => git2::ResetType::Hard,
            ResetMode::Mixed => git2::ResetType::Mixed,
        }
    }
}

impl std::fmt::Display for ResetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetMode::Hard => write!(f, "hard"),
            ResetMode::Mixed => write!(f, "mixed"),
        }
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// should import `git2` directly.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository whose metadata store is at `git_dir`.
    ///
    /// Unlike discovery, this never walks up to parent directories: a
    /// workspace nested inside some other checkout must not resolve to it.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if `git_dir` is not a repository
    pub fn open(git_dir: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open_ext(
            git_dir,
            git2::RepositoryOpenFlags::NO_SEARCH,
            std::iter::empty::<&std::ffi::OsStr>(),
        )
        .map_err(|_| GitError::NotARepo {
            path: git_dir.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Full hex id of the commit HEAD points at.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if the repository has no commits
    pub fn head_revision(&self) -> Result<String, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Err(GitError::UnbornHead {
                    path: self.repo.path().to_path_buf(),
                })
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        let commit = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        Ok(commit.id().to_string())
    }

    /// Reset HEAD (and, for [`ResetMode::Hard`], the working tree) to
    /// `revision`, discarding local changes to tracked files.
    ///
    /// # Errors
    ///
    /// - [`GitError::RevisionNotFound`] if `revision` does not name a commit
    /// - [`GitError::BareRepo`] for a hard reset without a working tree
    pub fn reset_to(&self, revision: &str, mode: ResetMode) -> Result<(), GitError> {
        if mode == ResetMode::Hard && self.repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        let object = self
            .repo
            .revparse_single(revision)
            .map_err(|e| GitError::from_git2(e, revision))?;
        let commit = object
            .peel(git2::ObjectType::Commit)
            .map_err(|e| GitError::from_git2(e, revision))?;

        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();

        self.repo
            .reset(&commit, mode.to_git2(), Some(&mut checkout))
            .map_err(|e| GitError::from_git2(e, revision))
    }

    /// Check whether tracked files differ from HEAD.
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(false).include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }
}
