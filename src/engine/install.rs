//! engine::install
//!
//! Install orchestrator: fetch every manifest package, then force each
//! pinned package's working copy to its pin.
//!
//! # Phases
//!
//! ```text
//! fetch all (in order)  ->  for each pinned: current == pin ? skip : revert
//! ```
//!
//! All fetches complete before any revert, so a package fetched later that
//! shares a repository with an earlier one cannot move it off its pin.
//!
//! # Fetch failures
//!
//! With `strict_fetch` off, a failed fetch is recorded in the report, a
//! warning is printed, and install moves on. A package that was never
//! fetched usually fails its revision query later, which is fatal. With
//! `strict_fetch` on, the first failed fetch is fatal and nothing is
//! reverted.
//!
//! # Output
//!
//! Each revert writes `<import path> (revert: <revision>)` to `out`. An
//! install that finds every package already pinned writes nothing, so a
//! second run is silent.

use std::io::Write;

use crate::core::manifest::Manifest;
use crate::core::types::{ImportPath, PackageRef};
use crate::ui::output::{self, Verbosity};

use super::error::PinError;
use super::fetch::Fetcher;
use super::inspect::RevisionInspector;

/// What an install did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Packages fetched successfully
    pub fetched: usize,
    /// Packages whose fetch failed (lenient mode only)
    pub fetch_failures: Vec<ImportPath>,
    /// Packages reset to their pin
    pub reverted: Vec<PackageRef>,
    /// Pinned packages that were already at their pin
    pub already_pinned: Vec<ImportPath>,
}

impl InstallReport {
    /// True if every fetch succeeded.
    pub fn is_clean(&self) -> bool {
        self.fetch_failures.is_empty()
    }
}

/// Runs installs against a manifest.
pub struct Installer<'a> {
    fetcher: Fetcher<'a>,
    inspector: RevisionInspector<'a>,
    strict_fetch: bool,
    verbosity: Verbosity,
}

impl<'a> Installer<'a> {
    pub fn new(
        fetcher: Fetcher<'a>,
        inspector: RevisionInspector<'a>,
        strict_fetch: bool,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            fetcher,
            inspector,
            strict_fetch,
            verbosity,
        }
    }

    /// Fetch and pin every package in `manifest`.
    ///
    /// # Errors
    ///
    /// The first fatal failure is returned and nothing after it runs:
    /// - [`PinError::Fetch`] in strict mode
    /// - [`PinError::RepoLocation`] or [`PinError::RevisionQuery`] while
    ///   reading a pinned package's current revision
    /// - [`PinError::Revert`] if a reset fails
    /// - [`PinError::Output`] if `out` cannot be written
    pub fn run(&self, manifest: &Manifest, out: &mut dyn Write) -> Result<InstallReport, PinError> {
        let mut report = InstallReport::default();

        for pkg in manifest {
            match self.fetcher.fetch(pkg) {
                Ok(()) => report.fetched += 1,
                Err(err) if !self.strict_fetch => {
                    output::warn(output::error_chain(&err), self.verbosity);
                    report.fetch_failures.push(pkg.import_path().clone());
                }
                Err(err) => return Err(err),
            }
        }

        for pkg in manifest.pinned() {
            let Some(pin) = pkg.pinned_revision() else {
                continue;
            };

            let current = self.inspector.current_revision(pkg.import_path())?;
            if current == pin {
                output::debug(
                    format!("{} already at {}", pkg.import_path(), pin),
                    self.verbosity,
                );
                report.already_pinned.push(pkg.import_path().clone());
                continue;
            }

            self.fetcher.revert(pkg, pin)?;
            writeln!(out, "{} (revert: {})", pkg.import_path(), pin)?;
            report.reverted.push(pkg.clone());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{FailOn, MockBackend, MockOperation};
    use crate::core::paths::Workspace;
    use crate::git::ResetMode;

    const AB: &str = "/go/src/github.com/a/b/.git";
    const CD: &str = "/go/src/github.com/c/d/.git";

    fn install(
        mock: &MockBackend,
        ws: &Workspace,
        strict: bool,
        text: &str,
    ) -> (Result<InstallReport, PinError>, String) {
        let manifest = Manifest::parse(text).unwrap();
        let installer = Installer::new(
            Fetcher::new(mock, mock, ws, ResetMode::Hard, Verbosity::Quiet),
            RevisionInspector::new(mock, ws),
            strict,
            Verbosity::Quiet,
        );
        let mut out = Vec::new();
        let result = installer.run(&manifest, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reverts_moved_package_and_prints_line() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new().with_head(AB, "new");

        let (result, out) = install(&mock, &ws, false, "github.com/a/b #old\n");
        let report = result.unwrap();

        assert_eq!(out, "github.com/a/b (revert: old)\n");
        assert_eq!(report.fetched, 1);
        assert_eq!(report.reverted.len(), 1);
        assert_eq!(mock.head(std::path::Path::new(AB)).as_deref(), Some("old"));
    }

    #[test]
    fn second_install_is_silent() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new().with_head(AB, "new");
        let text = "github.com/a/b #old\n";

        let (first, _) = install(&mock, &ws, false, text);
        first.unwrap();
        mock.clear_operations();

        let (second, out) = install(&mock, &ws, false, text);
        let report = second.unwrap();

        assert!(out.is_empty());
        assert!(report.reverted.is_empty());
        assert_eq!(report.already_pinned.len(), 1);
        assert!(mock.resets().is_empty());
    }

    #[test]
    fn unpinned_packages_are_fetched_not_inspected() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new();

        let (result, out) = install(&mock, &ws, false, "github.com/a/b\ngithub.com/c/d\n");
        result.unwrap();

        assert!(out.is_empty());
        assert_eq!(
            mock.operations(),
            vec![
                MockOperation::Fetch {
                    import_path: "github.com/a/b".into()
                },
                MockOperation::Fetch {
                    import_path: "github.com/c/d".into()
                },
            ]
        );
    }

    #[test]
    fn empty_manifest_does_nothing() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new();

        let (result, out) = install(&mock, &ws, false, "\n\n");

        assert_eq!(result.unwrap(), InstallReport::default());
        assert!(out.is_empty());
        assert!(mock.operations().is_empty());
    }

    #[test]
    fn all_fetches_happen_before_any_revert() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new().with_head(AB, "x").with_head(CD, "y");

        let (result, _) = install(&mock, &ws, false, "github.com/a/b #1\ngithub.com/c/d #2\n");
        result.unwrap();

        let ops = mock.operations();
        let last_fetch = ops
            .iter()
            .rposition(|op| matches!(op, MockOperation::Fetch { .. }))
            .unwrap();
        let first_reset = ops
            .iter()
            .position(|op| matches!(op, MockOperation::Reset { .. }))
            .unwrap();
        assert!(last_fetch < first_reset);
    }

    #[test]
    fn lenient_fetch_failure_is_recorded_and_install_continues() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new()
            .with_head(CD, "y")
            .fail_on(FailOn::Fetch("github.com/a/b".into()));

        let (result, out) = install(&mock, &ws, false, "github.com/a/b\ngithub.com/c/d #2\n");
        let report = result.unwrap();

        assert_eq!(report.fetched, 1);
        assert_eq!(report.fetch_failures.len(), 1);
        assert!(!report.is_clean());
        assert_eq!(out, "github.com/c/d (revert: 2)\n");
    }

    #[test]
    fn strict_fetch_failure_is_fatal_before_any_revert() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new()
            .with_head(AB, "x")
            .fail_on(FailOn::Fetch("github.com/c/d".into()));

        let (result, out) = install(&mock, &ws, true, "github.com/a/b #1\ngithub.com/c/d\n");

        assert!(matches!(result, Err(PinError::Fetch { .. })));
        assert!(out.is_empty());
        assert!(mock.resets().is_empty());
    }

    #[test]
    fn revert_failure_is_fatal_and_stops_later_packages() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new()
            .with_head(AB, "x")
            .with_head(CD, "y")
            .fail_on(FailOn::Reset(AB.into()));

        let (result, out) = install(&mock, &ws, false, "github.com/a/b #1\ngithub.com/c/d #2\n");

        match result {
            Err(PinError::Revert {
                import_path,
                revision,
                ..
            }) => {
                assert_eq!(import_path.as_str(), "github.com/a/b");
                assert_eq!(revision, "1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(out.is_empty());
        assert_eq!(mock.head(std::path::Path::new(CD)).as_deref(), Some("y"));
    }

    #[test]
    fn short_pinned_path_is_location_error() {
        let ws = Workspace::new("/go");
        let mock = MockBackend::new();

        let (result, _) = install(&mock, &ws, false, "github.com/a #1\n");

        assert!(matches!(result, Err(PinError::RepoLocation(_))));
    }
}
