//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--config <path>`: Use this global config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--verbose` / `-v`: Echo toolchain output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gooper - pin Go dependencies to exact revisions
#[derive(Parser, Debug)]
#[command(name = "gooper")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Run as if gooper was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Read global configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; toolchain output is discarded
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Echo toolchain output even if configuration turns it off
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch packages and reset them to their pinned revisions
    #[command(
        name = "install",
        long_about = "Fetch every package in the manifest and reset pinned ones.\n\n\
            Each package is fetched with `go get -d -v`. Afterwards every package \
            with a pin has its working copy under $GOPATH/src reset to that \
            revision, unless it is already there. Each reset prints one line \
            naming the package and the revision.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Install from ./Goopfile
    gooper install

    # Install from another manifest
    gooper install deps/Goopfile

MANIFEST FORMAT:
    github.com/acme/widget
    github.com/acme/gadget #0123456789abcdef0123456789abcdef01234567"
    )]
    Install {
        /// Manifest to read (default: Goopfile, or `manifest` from config)
        manifest: Option<PathBuf>,
    },

    /// Print hosted dependencies of the given files with current revisions
    #[command(
        name = "freeze",
        long_about = "Print the hosted dependencies of a build with their current revisions.\n\n\
            Runs `go list -f {{.Deps}}` on the entry files, keeps the import paths \
            under a hosted prefix (github.com by default), and prints each with the \
            revision its working copy is at. The output is a valid manifest.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Snapshot the current dependency revisions
    gooper freeze main.go > Goopfile

    # Machine-readable output
    gooper freeze --json main.go util.go"
    )]
    Freeze {
        /// Go source files of the build
        #[arg(required = true, value_name = "FILE")]
        entry_files: Vec<PathBuf>,

        /// Emit a JSON array instead of aligned columns
        #[arg(long)]
        json: bool,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build every package in the manifest
    Build {
        /// Manifest to read (default: Goopfile, or `manifest` from config)
        manifest: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    gooper completion bash > ~/.local/share/bash-completion/completions/gooper

    # Zsh
    gooper completion zsh > ~/.zfunc/_gooper

    # Fish
    gooper completion fish > ~/.config/fish/completions/gooper.fish

    # PowerShell
    gooper completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
