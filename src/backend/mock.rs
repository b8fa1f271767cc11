//! backend::mock
//!
//! Mock backend for deterministic testing.
//!
//! # Design
//!
//! [`MockBackend`] implements both [`Toolchain`] and [`SourceControl`]. It
//! keeps working-copy HEADs in memory keyed by metadata directory, records
//! every call, and can be told to fail specific operations. A reset moves
//! the in-memory HEAD, so running an install twice against the same mock
//! exercises the already-pinned path.
//!
//! # Example
//!
//! ```
//! use gooper::backend::mock::{MockBackend, MockOperation};
//! use gooper::backend::SourceControl;
//! use gooper::git::ResetMode;
//! use std::path::Path;
//!
//! let mock = MockBackend::new().with_head("/go/src/github.com/a/b/.git", "111");
//! let git_dir = Path::new("/go/src/github.com/a/b/.git");
//!
//! assert_eq!(mock.head_revision(git_dir).unwrap(), "111");
//! mock.reset(git_dir, "222", ResetMode::Hard).unwrap();
//! assert_eq!(mock.head_revision(git_dir).unwrap(), "222");
//! assert_eq!(mock.operations().len(), 3);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{BackendError, ExitDescription, SourceControl, Toolchain};
use crate::core::types::ImportPath;
use crate::git::{GitError, ResetMode};

/// Mock toolchain and source control for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockBackendInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockBackendInner {
    /// HEAD revision per metadata directory.
    heads: HashMap<PathBuf, String>,
    /// Metadata directories whose working copy has local changes.
    dirty: HashSet<PathBuf>,
    /// Raw text returned from `list_deps`.
    deps_output: String,
    /// Operations that should fail.
    fail_on: Vec<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    /// Fail `fetch` for this import path.
    Fetch(String),
    /// Fail `build` for this import path.
    Build(String),
    /// Fail `list_deps`.
    ListDeps,
    /// Fail `reset` in this metadata directory.
    Reset(PathBuf),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Fetch {
        import_path: String,
    },
    Build {
        import_path: String,
    },
    ListDeps {
        entry_files: Vec<PathBuf>,
    },
    HeadRevision {
        git_dir: PathBuf,
    },
    Reset {
        git_dir: PathBuf,
        revision: String,
        mode: ResetMode,
    },
    HasLocalChanges {
        git_dir: PathBuf,
    },
}

impl MockBackend {
    /// Create a new empty mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a working copy whose HEAD is at `revision`.
    pub fn with_head(self, git_dir: impl Into<PathBuf>, revision: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.heads.insert(git_dir.into(), revision.into());
        }
        self
    }

    /// Mark a working copy as having uncommitted changes.
    pub fn with_dirty(self, git_dir: impl Into<PathBuf>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.dirty.insert(git_dir.into());
        }
        self
    }

    /// Set the raw text `list_deps` returns.
    pub fn with_deps_output(self, output: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.deps_output = output.into();
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use gooper::backend::mock::{FailOn, MockBackend};
    ///
    /// let mock = MockBackend::new().fail_on(FailOn::ListDeps);
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on.push(fail_on);
        }
        self
    }

    /// Current in-memory HEAD of a working copy.
    pub fn head(&self, git_dir: &Path) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.heads.get(git_dir).cloned()
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Recorded resets only, in order.
    pub fn resets(&self) -> Vec<(PathBuf, String)> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Reset {
                    git_dir, revision, ..
                } => Some((git_dir, revision)),
                _ => None,
            })
            .collect()
    }

    /// Recorded fetches only, in order.
    pub fn fetches(&self) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                MockOperation::Fetch { import_path } => Some(import_path),
                _ => None,
            })
            .collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    fn should_fail(&self, check: &FailOn) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.fail_on.contains(check)
    }

    fn failed(command: String) -> BackendError {
        BackendError::Failed {
            command,
            status: ExitDescription::Code(1),
        }
    }

    fn not_a_repo(git_dir: &Path) -> BackendError {
        BackendError::Git(GitError::NotARepo {
            path: git_dir.to_path_buf(),
        })
    }
}

impl Toolchain for MockBackend {
    fn fetch(&self, import_path: &ImportPath) -> Result<(), BackendError> {
        self.record(MockOperation::Fetch {
            import_path: import_path.to_string(),
        });
        if self.should_fail(&FailOn::Fetch(import_path.to_string())) {
            return Err(Self::failed(format!("go get -v -d {}", import_path)));
        }
        Ok(())
    }

    fn build(&self, import_path: &ImportPath) -> Result<(), BackendError> {
        self.record(MockOperation::Build {
            import_path: import_path.to_string(),
        });
        if self.should_fail(&FailOn::Build(import_path.to_string())) {
            return Err(Self::failed(format!("go build -v {}", import_path)));
        }
        Ok(())
    }

    fn list_deps(&self, entry_files: &[PathBuf]) -> Result<String, BackendError> {
        self.record(MockOperation::ListDeps {
            entry_files: entry_files.to_vec(),
        });
        if self.should_fail(&FailOn::ListDeps) {
            return Err(Self::failed("go list -f {{.Deps}}".to_string()));
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner.deps_output.clone())
    }
}

impl SourceControl for MockBackend {
    fn head_revision(&self, git_dir: &Path) -> Result<String, BackendError> {
        self.record(MockOperation::HeadRevision {
            git_dir: git_dir.to_path_buf(),
        });
        self.head(git_dir).ok_or_else(|| Self::not_a_repo(git_dir))
    }

    fn reset(&self, git_dir: &Path, revision: &str, mode: ResetMode) -> Result<(), BackendError> {
        self.record(MockOperation::Reset {
            git_dir: git_dir.to_path_buf(),
            revision: revision.to_string(),
            mode,
        });
        if self.should_fail(&FailOn::Reset(git_dir.to_path_buf())) {
            return Err(BackendError::Git(GitError::RevisionNotFound {
                revision: revision.to_string(),
            }));
        }

        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        match inner.heads.get_mut(git_dir) {
            Some(head) => {
                *head = revision.to_string();
                if mode == ResetMode::Hard {
                    inner.dirty.remove(git_dir);
                }
                Ok(())
            }
            None => Err(Self::not_a_repo(git_dir)),
        }
    }

    fn has_local_changes(&self, git_dir: &Path) -> Result<bool, BackendError> {
        self.record(MockOperation::HasLocalChanges {
            git_dir: git_dir.to_path_buf(),
        });
        let inner = self.inner.lock().unwrap();
        if !inner.heads.contains_key(git_dir) {
            return Err(Self::not_a_repo(git_dir));
        }
        Ok(inner.dirty.contains(git_dir))
    }
}
