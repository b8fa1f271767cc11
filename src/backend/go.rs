//! backend::go
//!
//! [`Toolchain`] implementation that shells out to the `go` command.
//!
//! | operation   | command                          | stdout                   |
//! |-------------|----------------------------------|--------------------------|
//! | `fetch`     | `go get -v -d <path>`            | echoed when verbose      |
//! | `build`     | `go build -v <path>`             | echoed when verbose      |
//! | `list_deps` | `go list -f {{.Deps}} <files>`   | captured                 |
//!
//! Child stderr is always inherited so toolchain diagnostics reach the user.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::traits::{BackendError, Toolchain};
use crate::core::types::ImportPath;

/// Template passed to `go list` to print the dependency closure.
const DEPS_TEMPLATE: &str = "{{.Deps}}";

/// The Go toolchain.
#[derive(Debug, Clone)]
pub struct GoToolchain {
    /// Path or name of the `go` binary
    program: PathBuf,
    /// Echo child stdout for fetch and build
    verbose: bool,
}

impl GoToolchain {
    pub fn new(program: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            program: program.into(),
            verbose,
        }
    }

    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stderr(Stdio::inherit());
        cmd
    }

    fn describe(&self, args: &[OsString]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// Run to completion, streaming output instead of capturing it.
    fn run_streamed(&self, args: Vec<OsString>) -> Result<(), BackendError> {
        let stdout = if self.verbose {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let status = self
            .command(&args)
            .stdout(stdout)
            .status()
            .map_err(|source| BackendError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BackendError::Failed {
                command: self.describe(&args),
                status: status.into(),
            });
        }
        Ok(())
    }
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new("go", true)
    }
}

impl Toolchain for GoToolchain {
    fn fetch(&self, import_path: &ImportPath) -> Result<(), BackendError> {
        self.run_streamed(vec![
            "get".into(),
            "-v".into(),
            "-d".into(),
            import_path.as_str().into(),
        ])
    }

    fn build(&self, import_path: &ImportPath) -> Result<(), BackendError> {
        self.run_streamed(vec!["build".into(), "-v".into(), import_path.as_str().into()])
    }

    fn list_deps(&self, entry_files: &[PathBuf]) -> Result<String, BackendError> {
        let mut args: Vec<OsString> = vec!["list".into(), "-f".into(), DEPS_TEMPLATE.into()];
        args.extend(entry_files.iter().map(|f| f.as_os_str().to_owned()));

        let output = self
            .command(&args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackendError::Failed {
                command: self.describe(&args),
                status: output.status.into(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| BackendError::InvalidOutput {
            command: self.describe(&args),
            message: e.to_string(),
        })
    }
}
