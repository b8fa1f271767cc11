//! engine::build
//!
//! Build orchestrator: compile every manifest package in declaration order.

use crate::core::manifest::Manifest;

use super::error::PinError;
use super::fetch::Fetcher;

/// Build each package in `manifest`, stopping at the first failure.
///
/// Returns the number of packages built.
pub fn build_all(fetcher: &Fetcher<'_>, manifest: &Manifest) -> Result<usize, PinError> {
    for pkg in manifest {
        fetcher.build(pkg)?;
    }
    Ok(manifest.len())
}
