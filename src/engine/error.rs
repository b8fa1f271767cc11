//! engine::error
//!
//! The error taxonomy for pinning operations.
//!
//! Every variant carries structured fields (line number, import path,
//! revision) so callers and tests can match on them instead of parsing
//! messages. Underlying causes are kept as `source()` and are not repeated
//! in the variant's own message; print with `{:#}` through `anyhow` to see
//! the whole chain.

use thiserror::Error;

use crate::backend::BackendError;
use crate::core::manifest::ManifestError;
use crate::core::types::{ImportPath, RepoLocationError, TypeError};

/// Errors from pinning operations.
#[derive(Debug, Error)]
pub enum PinError {
    /// The manifest could not be read or has a malformed line.
    #[error(transparent)]
    Format(#[from] ManifestError),

    /// The import path is too short to locate a working copy.
    #[error(transparent)]
    RepoLocation(#[from] RepoLocationError),

    /// Reading the current revision failed.
    #[error("could not get revision of package '{import_path}'")]
    RevisionQuery {
        import_path: ImportPath,
        source: BackendError,
    },

    /// The toolchain could not fetch a package.
    #[error("could not fetch package '{import_path}'")]
    Fetch {
        import_path: ImportPath,
        source: BackendError,
    },

    /// The working copy could not be forced to the pin.
    #[error("could not reset '{import_path}' to commit '{revision}'")]
    Revert {
        import_path: ImportPath,
        revision: String,
        source: BackendError,
    },

    /// Dependency discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The toolchain could not build a package.
    #[error("could not build package '{import_path}'")]
    Build {
        import_path: ImportPath,
        source: BackendError,
    },

    /// Writing command output failed.
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

/// Errors from dependency discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The toolchain dependency listing failed.
    #[error("could not list dependencies")]
    Listing(#[source] BackendError),

    /// The listing printed something that is not an import path.
    #[error("unusable dependency '{dependency}'")]
    InvalidDependency {
        dependency: String,
        source: TypeError,
    },

    /// A discovered package's revision could not be read.
    #[error("could not get SHA of package '{import_path}'")]
    Revision {
        import_path: ImportPath,
        #[source]
        source: Box<PinError>,
    },
}

impl PinError {
    /// The import path this error is about, if any.
    pub fn import_path(&self) -> Option<&ImportPath> {
        match self {
            PinError::RevisionQuery { import_path, .. }
            | PinError::Fetch { import_path, .. }
            | PinError::Revert { import_path, .. }
            | PinError::Build { import_path, .. }
            | PinError::Discovery(DiscoveryError::Revision { import_path, .. }) => {
                Some(import_path)
            }
            _ => None,
        }
    }
}
