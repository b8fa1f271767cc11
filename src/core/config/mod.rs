//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gooper has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Overrides for one project, next to its `Goopfile`
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. The `--config` path, if given
//! 2. `$GOOPER_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/gooper/config.toml`
//! 4. `~/.gooper/config.toml`
//!
//! # Project Config Location
//!
//! `.gooper.toml` in the working directory.
//!
//! # Example
//!
//! ```no_run
//! use gooper::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(None, Some(Path::new("."))).unwrap();
//! let settings = config.settings();
//! println!("manifest: {}", settings.manifest.display());
//! println!("hosted: {:?}", settings.hosted_prefixes);
//! ```

pub mod schema;

pub use schema::ConfigFile;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::manifest::DEFAULT_MANIFEST;
use crate::git::ResetMode;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GOOPER_CONFIG";

/// Project config file name.
pub const PROJECT_CONFIG: &str = ".gooper.toml";

/// Hosting service whose packages are pinned by default.
pub const DEFAULT_HOSTED_PREFIX: &str = "github.com";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Fully resolved settings, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Manifest used when no path is given
    pub manifest: PathBuf,
    /// Echo toolchain stdout during fetch and build
    pub verbose: bool,
    /// Abort install on the first failed fetch
    pub strict_fetch: bool,
    /// Toolchain binary
    pub go: PathBuf,
    /// Reset kind for reverts
    pub reset: ResetMode,
    /// Hosted import path prefixes
    pub hosted_prefixes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            verbose: true,
            strict_fetch: false,
            go: PathBuf::from("go"),
            reset: ResetMode::default(),
            hosted_prefixes: vec![DEFAULT_HOSTED_PREFIX.to_string()],
        }
    }
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Project configuration (if present)
    pub project: Option<ConfigFile>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` replaces the global search. If `project_dir` is provided,
    /// `.gooper.toml` in it is loaded as the project scope.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. Missing config files are not an error. An explicit
    /// path that does not exist is an error.
    pub fn load(explicit: Option<&Path>, project_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, global_path) = match explicit {
            Some(path) => (Self::read_config(path)?, Some(path.to_path_buf())),
            None => match Self::find_global() {
                Some(path) => (Self::read_config(&path)?, Some(path)),
                None => (ConfigFile::default(), None),
            },
        };

        let (project, project_path) = match project_dir.map(|d| d.join(PROJECT_CONFIG)) {
            Some(path) if path.exists() => (Some(Self::read_config(&path)?), Some(path)),
            _ => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Config {
            global,
            project,
            global_path,
            project_path,
        })
    }

    /// Find the global config file in the standard locations.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $GOOPER_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/gooper/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gooper/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.gooper/config.toml
        dirs::home_dir()
            .map(|home| home.join(".gooper/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look a key up in the project scope, then the global scope.
    fn lookup<T>(&self, get: impl Fn(&ConfigFile) -> Option<T>) -> Option<T> {
        self.project.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    /// Resolve every setting with precedence and defaults applied.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            manifest: self
                .lookup(|c| c.manifest.clone())
                .unwrap_or(defaults.manifest),
            verbose: self.lookup(|c| c.verbose).unwrap_or(defaults.verbose),
            strict_fetch: self
                .lookup(|c| c.strict_fetch)
                .unwrap_or(defaults.strict_fetch),
            go: self.lookup(|c| c.go.clone()).unwrap_or(defaults.go),
            reset: self.lookup(|c| c.reset).unwrap_or(defaults.reset),
            hosted_prefixes: self
                .lookup(|c| c.hosted_prefixes.clone())
                .unwrap_or(defaults.hosted_prefixes),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
