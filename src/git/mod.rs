//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Working-copy revision reads
//! and resets flow through this interface. No other module should import
//! `git2`.
//!
//! We use the `git2` crate exclusively (no shelling out to the git CLI).
//!
//! # Responsibilities
//!
//! - Opening a repository from its metadata directory
//! - Reading the HEAD revision
//! - Forced resets to a revision
//!
//! # Example
//!
//! ```ignore
//! use gooper::git::{Git, ResetMode};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("/go/src/github.com/acme/widget/.git"))?;
//! if git.head_revision()? != pin {
//!     git.reset_to(&pin, ResetMode::Hard)?;
//! }
//! ```

mod interface;

pub use interface::{Git, GitError, ResetMode};
