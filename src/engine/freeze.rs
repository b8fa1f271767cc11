//! engine::freeze
//!
//! Freeze orchestrator: snapshot the hosted dependencies of a build with
//! their current revisions.
//!
//! Text output is one line per package, the import path left-aligned and
//! padded to the longest path, one space, then the revision:
//!
//! ```text
//! github.com/acme/widget          4f1c...
//! github.com/acme/gadget/encoding 9ab0...
//! ```
//!
//! JSON output is an array of `{"import_path", "revision"}` objects in the
//! same order.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::types::PackageRef;

use super::discover::Discoverer;
use super::error::PinError;

/// How a frozen snapshot is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrozenFormat {
    /// Aligned columns
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Render packages as aligned `<path> <revision>` lines.
///
/// Width is the longest import path in bytes. An empty slice renders as the
/// empty string.
///
/// # Example
///
/// ```
/// use gooper::core::types::{ImportPath, PackageRef};
/// use gooper::engine::freeze::render_frozen;
///
/// let pkgs = vec![
///     PackageRef::pinned(ImportPath::new("github.com/a/bb").unwrap(), "111"),
///     PackageRef::pinned(ImportPath::new("github.com/a/b").unwrap(), "222"),
/// ];
/// assert_eq!(render_frozen(&pkgs), "github.com/a/bb 111\ngithub.com/a/b  222\n");
/// ```
pub fn render_frozen(packages: &[PackageRef]) -> String {
    let width = packages
        .iter()
        .map(|p| p.import_path().len())
        .max()
        .unwrap_or(0);

    let mut rendered = String::new();
    for pkg in packages {
        let path = pkg.import_path().as_str();
        rendered.push_str(path);
        rendered.push_str(&" ".repeat(width - path.len()));
        rendered.push(' ');
        rendered.push_str(pkg.pinned_revision().unwrap_or_default());
        rendered.push('\n');
    }
    rendered
}

/// Render packages as a pretty-printed JSON array.
pub fn render_json(packages: &[PackageRef]) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(packages)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Discover the hosted dependencies of `entry_files` and write them to
/// `out` in `format`.
///
/// Nothing is written unless discovery succeeds for every package.
pub fn freeze(
    discoverer: &Discoverer<'_>,
    entry_files: &[PathBuf],
    format: FrozenFormat,
    out: &mut dyn Write,
) -> Result<Vec<PackageRef>, PinError> {
    let packages = discoverer.discover(entry_files)?;

    let rendered = match format {
        FrozenFormat::Text => render_frozen(&packages),
        FrozenFormat::Json => render_json(&packages).map_err(io::Error::from)?,
    };
    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    Ok(packages)
}
