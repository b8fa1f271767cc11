//! engine::inspect
//!
//! Revision inspector: which revision a package's working copy is at.

use crate::backend::SourceControl;
use crate::core::paths::Workspace;
use crate::core::types::ImportPath;

use super::error::PinError;

/// Reads current revisions of working copies in a workspace.
pub struct RevisionInspector<'a> {
    scm: &'a dyn SourceControl,
    workspace: &'a Workspace,
}

impl<'a> RevisionInspector<'a> {
    pub fn new(scm: &'a dyn SourceControl, workspace: &'a Workspace) -> Self {
        Self { scm, workspace }
    }

    /// The revision HEAD of the package's working copy points at.
    ///
    /// The working copy is `<workspace>/src/<host>/<org>/<repo>`. The
    /// returned revision is trimmed of surrounding whitespace and otherwise
    /// left exactly as the source control reports it.
    ///
    /// # Errors
    ///
    /// - [`PinError::RepoLocation`] if the path has fewer than 3 segments
    /// - [`PinError::RevisionQuery`] if the metadata store cannot be read
    pub fn current_revision(&self, import_path: &ImportPath) -> Result<String, PinError> {
        let git_dir = self.workspace.metadata_dir(import_path)?;
        let revision =
            self.scm
                .head_revision(&git_dir)
                .map_err(|source| PinError::RevisionQuery {
                    import_path: import_path.clone(),
                    source,
                })?;
        Ok(revision.trim().to_string())
    }
}
