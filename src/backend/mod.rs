//! backend
//!
//! Abstraction over the external collaborators: the Go toolchain and
//! source control.
//!
//! # Implementations
//!
//! - [`go::GoToolchain`] - runs the `go` command
//! - [`git::GitSourceControl`] - libgit2 through [`crate::git`]
//! - [`mock::MockBackend`] - in-memory, for tests
//!
//! # Example
//!
//! ```ignore
//! use gooper::backend::{GitSourceControl, GoToolchain, SourceControl, Toolchain};
//!
//! let go = GoToolchain::new("go", true);
//! go.fetch(&import_path)?;
//!
//! let scm = GitSourceControl::new();
//! let head = scm.head_revision(&git_dir)?;
//! ```

pub mod git;
pub mod go;
pub mod mock;
mod traits;

pub use git::GitSourceControl;
pub use go::GoToolchain;
pub use traits::*;
