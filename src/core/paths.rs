//! core::paths
//!
//! Centralized path routing for package working copies.
//!
//! # Layout
//!
//! Every package lives under the workspace root (the first `GOPATH` entry):
//!
//! ```text
//! <root>/src/<host>/<org>/<repo>/        working copy
//! <root>/src/<host>/<org>/<repo>/.git/   source-control metadata store
//! ```
//!
//! Only the first three import path segments locate the repository, so
//! `github.com/acme/widget/sub` and `github.com/acme/widget` share one
//! working copy.
//!
//! **Hard rule:** No code outside this module should compute `src/...` or
//! `.git` paths for packages. All derivations go through [`Workspace`].
//!
//! # Example
//!
//! ```
//! use gooper::core::paths::Workspace;
//! use gooper::core::types::ImportPath;
//! use std::path::PathBuf;
//!
//! let ws = Workspace::new("/home/me/go");
//! let pkg = ImportPath::new("github.com/acme/widget/sub").unwrap();
//!
//! assert_eq!(
//!     ws.metadata_dir(&pkg).unwrap(),
//!     PathBuf::from("/home/me/go/src/github.com/acme/widget/.git")
//! );
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{ImportPath, RepoLocationError};

/// Environment variable naming the workspace root.
pub const WORKSPACE_ENV: &str = "GOPATH";

/// Name of the source-control metadata directory inside a working copy.
pub const METADATA_DIR: &str = ".git";

/// Errors from resolving the workspace.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("{} not set", WORKSPACE_ENV)]
    NotSet,
}

/// The workspace that owns package working copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the workspace from `GOPATH`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotSet`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self, WorkspaceError> {
        let value = std::env::var_os(WORKSPACE_ENV).ok_or(WorkspaceError::NotSet)?;
        Self::from_path_list(&value)
    }

    /// Resolve the workspace from a `GOPATH`-style list.
    ///
    /// The first non-empty entry wins; `go get` downloads into it.
    ///
    /// # Example
    ///
    /// ```
    /// use gooper::core::paths::Workspace;
    /// use std::path::Path;
    ///
    /// let list = std::env::join_paths(["/a", "/b"]).unwrap();
    /// let ws = Workspace::from_path_list(&list).unwrap();
    /// assert_eq!(ws.root(), Path::new("/a"));
    /// ```
    pub fn from_path_list(value: &OsStr) -> Result<Self, WorkspaceError> {
        std::env::split_paths(value)
            .find(|p| !p.as_os_str().is_empty())
            .map(Self::new)
            .ok_or(WorkspaceError::NotSet)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `src` directory holding all working copies.
    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    /// The working copy directory for a package.
    ///
    /// # Errors
    ///
    /// Returns [`RepoLocationError`] if the import path has fewer than
    /// three segments.
    pub fn working_copy(&self, path: &ImportPath) -> Result<PathBuf, RepoLocationError> {
        let repo_root = path.repo_root()?;
        let mut dir = self.src_dir();
        for segment in repo_root.split('/') {
            dir.push(segment);
        }
        Ok(dir)
    }

    /// The metadata store (`.git`) of a package's working copy.
    pub fn metadata_dir(&self, path: &ImportPath) -> Result<PathBuf, RepoLocationError> {
        Ok(self.working_copy(path)?.join(METADATA_DIR))
    }
}
