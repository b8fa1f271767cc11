//! core::manifest
//!
//! The `Goopfile` manifest: one package per line, optionally pinned.
//!
//! # Format
//!
//! ```text
//! github.com/acme/widget
//! github.com/acme/gadget #0123456789abcdef0123456789abcdef01234567
//! ```
//!
//! Tabs are normalized to spaces and each line is tokenized on runs of
//! whitespace. A line with one field is an unpinned package, a line with two
//! fields is pinned to the second field with any leading `#` characters
//! stripped (the `#` is an annotation marker, not a comment). Blank lines are
//! skipped. Any other field count is a [`ManifestError::Format`] carrying the
//! 1-based line number.
//!
//! # Example
//!
//! ```
//! use gooper::core::manifest::Manifest;
//!
//! let manifest = Manifest::parse("github.com/a/b #deadbeef\n\ngithub.com/c/d\n").unwrap();
//! assert_eq!(manifest.len(), 2);
//! assert_eq!(manifest.packages()[0].pinned_revision(), Some("deadbeef"));
//! assert!(!manifest.packages()[1].is_pinned());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{ImportPath, PackageRef};

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "Goopfile";

/// Errors from reading or parsing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A line has a field count other than 0, 1 or 2.
    #[error("line {line}: invalid number of columns ({fields}, expected 1 or 2)")]
    Format {
        /// 1-based line number
        line: usize,
        /// Number of whitespace-separated fields found
        fields: usize,
    },

    /// The manifest file could not be read.
    #[error("failed to read manifest '{path}'")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An ordered list of package references, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    packages: Vec<PackageRef>,
}

impl Manifest {
    /// Parse manifest text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Format`] for the first line whose field
    /// count is not 0, 1 or 2.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut packages = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.replace('\t', " ");
            let fields: Vec<&str> = line.split_whitespace().collect();

            let pkg = match fields.as_slice() {
                [] => continue,
                [path] => PackageRef::unpinned(ImportPath::from_token(path)),
                [path, revision] => PackageRef::pinned(
                    ImportPath::from_token(path),
                    revision.trim_start_matches('#'),
                ),
                _ => {
                    return Err(ManifestError::Format {
                        line: line_no,
                        fields: fields.len(),
                    })
                }
            };
            packages.push(pkg);
        }

        Ok(Self { packages })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text)
    }

    pub fn packages(&self) -> &[PackageRef] {
        &self.packages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageRef> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages that carry a pin.
    pub fn pinned(&self) -> impl Iterator<Item = &PackageRef> {
        self.packages.iter().filter(|p| p.is_pinned())
    }

    /// Write the manifest back out, one package per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for pkg in &self.packages {
            out.push_str(&pkg.to_string());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a PackageRef;
    type IntoIter = std::slice::Iter<'a, PackageRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(manifest: &Manifest) -> Vec<&str> {
        manifest.iter().map(|p| p.import_path().as_str()).collect()
    }

    #[test]
    fn no_pin_line() {
        let manifest = Manifest::parse("host.com/a/b").unwrap();
        assert_eq!(manifest.len(), 1);
        let pkg = &manifest.packages()[0];
        assert_eq!(pkg.import_path().as_str(), "host.com/a/b");
        assert_eq!(pkg.pinned_revision(), None);
    }

    #[test]
    fn pin_is_stripped_of_hashes() {
        let manifest = Manifest::parse("host.com/a/b #deadbeef").unwrap();
        let pkg = &manifest.packages()[0];
        assert_eq!(pkg.import_path().as_str(), "host.com/a/b");
        assert_eq!(pkg.pinned_revision(), Some("deadbeef"));
    }

    #[test]
    fn leading_hash_run_is_stripped() {
        let manifest = Manifest::parse("host.com/a/b ###cafe").unwrap();
        assert_eq!(manifest.packages()[0].pinned_revision(), Some("cafe"));
    }

    #[test]
    fn pin_without_hash_is_kept() {
        let manifest = Manifest::parse("host.com/a/b cafe").unwrap();
        assert_eq!(manifest.packages()[0].pinned_revision(), Some("cafe"));
    }

    #[test]
    fn bare_hash_means_no_pin() {
        let manifest = Manifest::parse("host.com/a/b #").unwrap();
        assert!(!manifest.packages()[0].is_pinned());
    }

    #[test]
    fn tabs_and_runs_of_spaces_separate_fields() {
        let manifest = Manifest::parse("host.com/a/b\t\t#abc\nhost.com/c/d    #def\n").unwrap();
        assert_eq!(paths(&manifest), vec!["host.com/a/b", "host.com/c/d"]);
        assert_eq!(manifest.packages()[0].pinned_revision(), Some("abc"));
        assert_eq!(manifest.packages()[1].pinned_revision(), Some("def"));
    }

    #[test]
    fn blank_lines_are_skipped_and_order_kept() {
        let text = "\nhost.com/z/z\n\n   \nhost.com/a/a #1\n\t\nhost.com/m/m\n";
        let manifest = Manifest::parse(text).unwrap();
        assert_eq!(
            paths(&manifest),
            vec!["host.com/z/z", "host.com/a/a", "host.com/m/m"]
        );
    }

    #[test]
    fn empty_manifest() {
        assert!(Manifest::parse("").unwrap().is_empty());
        assert!(Manifest::parse("\n\n  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn unicode_whitespace_separates_fields() {
        let manifest = Manifest::parse("host.com/a/b\u{a0}#abc\u{2003}\n").unwrap();
        let pkg = &manifest.packages()[0];
        assert_eq!(pkg.import_path(), &ImportPath::new("host.com/a/b").unwrap());
        assert_eq!(pkg.pinned_revision(), Some("abc"));
    }

    #[test]
    fn crlf_line_endings() {
        let manifest = Manifest::parse("host.com/a/b #abc\r\nhost.com/c/d\r\n").unwrap();
        assert_eq!(manifest.packages()[0].pinned_revision(), Some("abc"));
        assert_eq!(manifest.packages()[1].import_path().as_str(), "host.com/c/d");
    }

    #[test]
    fn three_fields_rejected_with_line_number() {
        let err = Manifest::parse("a b c").unwrap_err();
        assert!(matches!(err, ManifestError::Format { line: 1, fields: 3 }));
    }

    #[test]
    fn line_numbers_are_one_based_and_count_blank_lines() {
        let text = "\nhost.com/a/b\n\nhost.com/c/d #x y\n";
        let err = Manifest::parse(text).unwrap_err();
        match err {
            ManifestError::Format { line, fields } => {
                assert_eq!(line, 4);
                assert_eq!(fields, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn format_error_message_names_line() {
        let err = Manifest::parse("ok.com/a/b\na b c d").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 2: invalid number of columns (4, expected 1 or 2)"
        );
    }

    #[test]
    fn pinned_iterator_skips_unpinned() {
        let manifest = Manifest::parse("h.com/a/a #1\nh.com/b/b\nh.com/c/c #3").unwrap();
        let pinned: Vec<_> = manifest
            .pinned()
            .map(|p| p.import_path().as_str())
            .collect();
        assert_eq!(pinned, vec!["h.com/a/a", "h.com/c/c"]);
    }

    #[test]
    fn render_normalizes_whitespace() {
        let manifest = Manifest::parse("h.com/a/a\t##1\n\nh.com/b/b\n").unwrap();
        assert_eq!(manifest.render(), "h.com/a/a #1\nh.com/b/b\n");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join(DEFAULT_MANIFEST)).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_MANIFEST);
        std::fs::write(&path, "github.com/a/b #abc\n").unwrap();
        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.len(), 1);
    }
}
