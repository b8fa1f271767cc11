//! install command - Fetch packages and reset them to their pins

use std::io;
use std::path::Path;

use anyhow::Result;

use super::Session;
use crate::core::manifest::Manifest;
use crate::engine::{Context, Fetcher, Installer, RevisionInspector};
use crate::ui::output;

/// Fetch every manifest package and reset pinned ones.
pub fn install(ctx: &Context, manifest: Option<&Path>) -> Result<()> {
    let session = Session::open(ctx)?;
    let verbosity = ctx.verbosity();

    let path = session.manifest_path(manifest);
    output::debug(format!("manifest: {}", path.display()), verbosity);
    let manifest = Manifest::load(&path)?;

    let installer = Installer::new(
        Fetcher::new(
            &session.toolchain,
            &session.scm,
            &session.workspace,
            session.settings.reset,
            verbosity,
        ),
        RevisionInspector::new(&session.scm, &session.workspace),
        session.settings.strict_fetch,
        verbosity,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = installer.run(&manifest, &mut out)?;

    output::debug(
        format!(
            "fetched {}, failed {}, reverted {}, already pinned {}",
            report.fetched,
            report.fetch_failures.len(),
            report.reverted.len(),
            report.already_pinned.len()
        ),
        verbosity,
    );
    if !report.is_clean() {
        output::warn(
            format!(
                "{} package(s) could not be fetched",
                report.fetch_failures.len()
            ),
            verbosity,
        );
    }

    Ok(())
}
