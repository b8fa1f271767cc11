//! freeze command - Print hosted dependencies with current revisions

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::Session;
use crate::engine::{self, Context, Discoverer, FrozenFormat, RevisionInspector};
use crate::ui::output;

/// Discover hosted dependencies of `entry_files` and print them.
///
/// With `output_path`, the snapshot goes to that file instead of stdout. The
/// file is only written once discovery has succeeded.
pub fn freeze(
    ctx: &Context,
    entry_files: &[PathBuf],
    json: bool,
    output_path: Option<&Path>,
) -> Result<()> {
    let session = Session::open(ctx)?;
    let verbosity = ctx.verbosity();

    let discoverer = Discoverer::new(
        &session.toolchain,
        RevisionInspector::new(&session.scm, &session.workspace),
        &session.settings.hosted_prefixes,
        verbosity,
    );
    let format = if json {
        FrozenFormat::Json
    } else {
        FrozenFormat::Text
    };

    let entry_files: Vec<PathBuf> = entry_files.iter().map(|f| session.dir.join(f)).collect();
    let mut snapshot = Vec::new();
    let packages = engine::freeze(&discoverer, &entry_files, format, &mut snapshot)?;

    match output_path {
        Some(path) => {
            let path = session.dir.join(path);
            fs::write(&path, &snapshot)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&snapshot)?;
            out.flush()?;
        }
    }

    output::debug(format!("froze {} package(s)", packages.len()), verbosity);
    Ok(())
}
