//! gooper - pin Go dependencies to exact revisions
//!
//! gooper reads a `Goopfile` listing Go import paths with optional commit
//! pins, fetches each package with `go get`, and resets the working copy of
//! every pinned package under `$GOPATH/src` to its pin. `gooper freeze`
//! goes the other way: it lists the hosted dependencies of a build with the
//! revisions currently checked out, in manifest form.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Install, freeze and build orchestration
//! - [`core`] - Domain types, manifest parsing, workspace paths, configuration
//! - [`backend`] - The `Toolchain` and `SourceControl` seams and their implementations
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Install is idempotent: a second run over an unchanged workspace
//!    reverts nothing and prints nothing
//! 2. After a successful install every pinned package is at its pin
//! 3. Manifest order is preserved everywhere; freeze follows the
//!    toolchain's dependency order

pub mod backend;
pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
