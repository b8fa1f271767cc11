//! core
//!
//! Domain types, the manifest format, workspace paths and configuration.
//!
//! # Modules
//!
//! - [`types`] - `ImportPath` and `PackageRef`
//! - [`manifest`] - `Goopfile` parsing and rendering
//! - [`paths`] - Working-copy location under the workspace root
//! - [`config`] - Global and project configuration
//!
//! Nothing in `core` performs process or repository I/O; that lives in
//! [`crate::backend`].

pub mod config;
pub mod manifest;
pub mod paths;
pub mod types;
