//! engine::discover
//!
//! Dependency discoverer: the hosted packages a set of entry files depends
//! on, each with the revision currently checked out.
//!
//! # Pipeline
//!
//! ```text
//! go list -f {{.Deps}} <files>   ->  "[fmt github.com/a/b/c net/http]"
//! parse_dep_list                 ->  fmt, github.com/a/b/c, net/http
//! hosted filter (literal prefix) ->  github.com/a/b/c
//! revision inspector             ->  github.com/a/b/c @ <sha>
//! ```
//!
//! Order is the order the toolchain printed; nothing is re-sorted. Every
//! token becomes an [`ImportPath`] before filtering, and the filter is
//! [`ImportPath::has_prefix`], so a prefix of `github.com` also admits
//! `github.company.io/...`.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::backend::Toolchain;
use crate::core::types::{ImportPath, PackageRef};
use crate::ui::output::{self, Verbosity};

use super::error::{DiscoveryError, PinError};
use super::inspect::RevisionInspector;

/// Split raw dependency listing output into import paths.
///
/// Each line is one bracketed list; brackets and surrounding whitespace are
/// trimmed and the rest split on single spaces. Lines are concatenated in
/// order and a path seen twice keeps its first position.
///
/// # Example
///
/// ```
/// use gooper::engine::discover::parse_dep_list;
///
/// let deps = parse_dep_list("[fmt github.com/a/b/c]\n[github.com/a/b/c os]\n");
/// assert_eq!(deps, vec!["fmt", "github.com/a/b/c", "os"]);
/// ```
pub fn parse_dep_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for line in raw.lines() {
        let inner = line.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace());
        for dep in inner.split(' ').filter(|d| !d.is_empty()) {
            if seen.insert(dep) {
                deps.push(dep.to_string());
            }
        }
    }

    deps
}

/// Keep the dependencies that start with one of the hosted prefixes.
///
/// Matching is [`ImportPath::has_prefix`]: literal and anchored at the start.
pub fn filter_hosted<'d>(deps: &'d [ImportPath], prefixes: &[String]) -> Vec<&'d ImportPath> {
    deps.iter()
        .filter(|dep| prefixes.iter().any(|p| dep.has_prefix(p)))
        .collect()
}

/// Discovers the hosted dependency closure of entry files.
pub struct Discoverer<'a> {
    toolchain: &'a dyn Toolchain,
    inspector: RevisionInspector<'a>,
    hosted_prefixes: &'a [String],
    verbosity: Verbosity,
}

impl<'a> Discoverer<'a> {
    pub fn new(
        toolchain: &'a dyn Toolchain,
        inspector: RevisionInspector<'a>,
        hosted_prefixes: &'a [String],
        verbosity: Verbosity,
    ) -> Self {
        Self {
            toolchain,
            inspector,
            hosted_prefixes,
            verbosity,
        }
    }

    /// Discover hosted dependencies with their current revisions.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Listing`] if the toolchain listing fails
    /// - [`DiscoveryError::Revision`] naming the first package whose
    ///   revision cannot be read; no partial result is returned
    pub fn discover(&self, entry_files: &[PathBuf]) -> Result<Vec<PackageRef>, PinError> {
        let raw = self
            .toolchain
            .list_deps(entry_files)
            .map_err(DiscoveryError::Listing)?;

        let deps = parse_dep_list(&raw)
            .into_iter()
            .map(|dep| {
                ImportPath::new(dep.as_str())
                    .map_err(|source| DiscoveryError::InvalidDependency { dependency: dep, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let hosted = filter_hosted(&deps, self.hosted_prefixes);
        output::debug(
            format!(
                "{} dependencies, {} hosted",
                deps.len(),
                hosted.len()
            ),
            self.verbosity,
        );

        let mut packages = Vec::with_capacity(hosted.len());
        for import_path in hosted {
            let revision = self
                .inspector
                .current_revision(import_path)
                .map_err(|source| DiscoveryError::Revision {
                    import_path: import_path.clone(),
                    source: Box::new(source),
                })?;
            packages.push(PackageRef::pinned(import_path.clone(), revision));
        }

        Ok(packages)
    }
}
