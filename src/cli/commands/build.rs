//! build command - Compile every manifest package

use std::path::Path;

use anyhow::Result;

use super::Session;
use crate::core::manifest::Manifest;
use crate::engine::{build_all, Context, Fetcher};
use crate::ui::output;

/// Build every package listed in the manifest.
pub fn build(ctx: &Context, manifest: Option<&Path>) -> Result<()> {
    let session = Session::open(ctx)?;
    let verbosity = ctx.verbosity();

    let manifest = Manifest::load(&session.manifest_path(manifest))?;
    let fetcher = Fetcher::new(
        &session.toolchain,
        &session.scm,
        &session.workspace,
        session.settings.reset,
        verbosity,
    );

    let built = build_all(&fetcher, &manifest)?;
    output::debug(format!("built {} package(s)", built), verbosity);
    Ok(())
}
