//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the project file; every
//! key is optional and unset keys fall through to the next scope.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g. hosted prefixes must be
//! non-empty, the toolchain path must be non-empty).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::git::ResetMode;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// manifest = "Goopfile"
/// verbose = true
/// strict_fetch = false
/// go = "/usr/local/go/bin/go"
/// reset = "hard"
/// hosted_prefixes = ["github.com"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Manifest file name used when none is given on the command line
    pub manifest: Option<PathBuf>,

    /// Echo toolchain stdout during fetch and build
    pub verbose: Option<bool>,

    /// Treat a failed fetch as fatal
    pub strict_fetch: Option<bool>,

    /// Toolchain binary
    pub go: Option<PathBuf>,

    /// Reset kind used when reverting to a pin
    pub reset: Option<ResetMode>,

    /// Import path prefixes considered hosted (subject to freeze)
    pub hosted_prefixes: Option<Vec<String>>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(manifest) = &self.manifest {
            if manifest.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest cannot be empty".to_string(),
                ));
            }
        }

        if let Some(go) = &self.go {
            if go.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("go cannot be empty".to_string()));
            }
        }

        if let Some(prefixes) = &self.hosted_prefixes {
            if prefixes.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "hosted_prefixes cannot be an empty list".to_string(),
                ));
            }
            if prefixes.iter().any(|p| p.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "hosted_prefixes entries cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
