//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ImportPath`] - Validated Go import path (`host/org/repo[/subpath...]`)
//! - [`PackageRef`] - An import path plus an optional pinned revision
//!
//! # Validation
//!
//! These types enforce validity at construction time. An `ImportPath` is
//! never empty and never contains whitespace, so every token produced by the
//! manifest tokenizer is a valid one.
//!
//! # Examples
//!
//! ```
//! use gooper::core::types::{ImportPath, PackageRef};
//!
//! let path = ImportPath::new("github.com/acme/widget/sub").unwrap();
//! assert_eq!(path.repo_root().unwrap(), "github.com/acme/widget");
//!
//! let pkg = PackageRef::pinned(path, "deadbeef");
//! assert_eq!(pkg.pinned_revision(), Some("deadbeef"));
//!
//! assert!(ImportPath::new("").is_err());
//! assert!(ImportPath::new("has space").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of leading import path segments that name a repository.
pub const REPO_ROOT_SEGMENTS: usize = 3;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid import path: {0}")]
    InvalidImportPath(String),
}

/// An import path too short to locate a working copy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("bad repo format: '{import_path}' has {segments} path segment(s), need at least 3 (host/org/repo)")]
pub struct RepoLocationError {
    /// The offending import path
    pub import_path: String,
    /// How many `/`-separated segments it has
    pub segments: usize,
}

/// A validated Go import path.
///
/// # Example
///
/// ```
/// use gooper::core::types::ImportPath;
///
/// let path = ImportPath::new("github.com/acme/widget").unwrap();
/// assert_eq!(path.segments().count(), 3);
/// assert!(path.has_prefix("github.com"));
///
/// let short = ImportPath::new("acme/widget").unwrap();
/// assert!(short.repo_root().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImportPath(String);

impl ImportPath {
    /// Create a new validated import path.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidImportPath` if the path is empty or
    /// contains whitespace.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::InvalidImportPath(
                "import path cannot be empty".into(),
            ));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidImportPath(format!(
                "import path cannot contain whitespace: '{}'",
                path
            )));
        }
        Ok(Self(path))
    }

    /// Wrap a token produced by `str::split_whitespace`.
    ///
    /// Such tokens are non-empty and contain no whitespace, so they always
    /// pass [`ImportPath::new`].
    pub(crate) fn from_token(token: &str) -> Self {
        debug_assert!(!token.is_empty() && !token.chars().any(char::is_whitespace));
        Self(token.to_string())
    }

    /// Get the import path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the path in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the `/`-separated segments.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('/')
    }

    /// Check whether this path starts with a literal prefix.
    ///
    /// This is a plain string match anchored at position 0, not host parsing.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// The repository part of the path: its first three segments.
    ///
    /// # Errors
    ///
    /// Returns [`RepoLocationError`] if the path has fewer than three segments.
    pub fn repo_root(&self) -> Result<String, RepoLocationError> {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() < REPO_ROOT_SEGMENTS {
            return Err(RepoLocationError {
                import_path: self.0.clone(),
                segments: segments.len(),
            });
        }
        Ok(segments[..REPO_ROOT_SEGMENTS].join("/"))
    }
}

impl TryFrom<String> for ImportPath {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImportPath> for String {
    fn from(path: ImportPath) -> Self {
        path.0
    }
}

impl std::fmt::Display for ImportPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ImportPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A package reference: import path plus optional pinned revision.
///
/// Values are immutable once built. The manifest parser builds them from
/// manifest lines, and dependency discovery builds them with the revision
/// currently checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    import_path: ImportPath,
    #[serde(rename = "revision", skip_serializing_if = "Option::is_none")]
    pinned_revision: Option<String>,
}

impl PackageRef {
    /// A reference that tracks the latest revision.
    pub fn unpinned(import_path: ImportPath) -> Self {
        Self {
            import_path,
            pinned_revision: None,
        }
    }

    /// A reference pinned to `revision`.
    ///
    /// An empty revision means no pin.
    pub fn pinned(import_path: ImportPath, revision: impl Into<String>) -> Self {
        let revision = revision.into();
        Self {
            import_path,
            pinned_revision: (!revision.is_empty()).then_some(revision),
        }
    }

    pub fn import_path(&self) -> &ImportPath {
        &self.import_path
    }

    pub fn pinned_revision(&self) -> Option<&str> {
        self.pinned_revision.as_deref()
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_revision.is_some()
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.pinned_revision {
            Some(rev) => write!(f, "{} #{}", self.import_path, rev),
            None => write!(f, "{}", self.import_path),
        }
    }
}
