//! Integration tests for the Git interface and the git-backed source control.
//!
//! These tests use real git repositories created via tempfile, laid out the
//! way `go get` leaves them: `<workspace>/src/<host>/<org>/<repo>`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use gooper::backend::mock::MockBackend;
use gooper::backend::{BackendError, GitSourceControl, SourceControl};
use gooper::core::manifest::Manifest;
use gooper::core::paths::Workspace;
use gooper::core::types::ImportPath;
use gooper::engine::{Discoverer, Fetcher, Installer, PinError, RevisionInspector};
use gooper::git::{Git, GitError, ResetMode};
use gooper::ui::output::Verbosity;

const IMPORT_PATH: &str = "github.com/acme/widget";

/// Test fixture: a workspace with one working copy holding two commits.
struct TestWorkspace {
    dir: TempDir,
    first: String,
    second: String,
}

impl TestWorkspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = dir.path().join("src").join(IMPORT_PATH);
        fs::create_dir_all(&repo).unwrap();

        run_git(&repo, &["init"]);
        run_git(&repo, &["config", "user.email", "test@example.com"]);
        run_git(&repo, &["config", "user.name", "Test User"]);

        fs::write(repo.join("widget.go"), "package widget\n").unwrap();
        run_git(&repo, &["add", "widget.go"]);
        run_git(&repo, &["commit", "-m", "Initial commit"]);
        let first = rev_parse_head(&repo);

        fs::write(repo.join("widget.go"), "package widget\n\nconst V = 2\n").unwrap();
        run_git(&repo, &["commit", "-am", "Second commit"]);
        let second = rev_parse_head(&repo);

        Self { dir, first, second }
    }

    fn workspace(&self) -> Workspace {
        Workspace::new(self.dir.path())
    }

    fn repo(&self) -> PathBuf {
        self.dir.path().join("src").join(IMPORT_PATH)
    }

    fn git_dir(&self) -> PathBuf {
        self.repo().join(".git")
    }

    fn head(&self) -> String {
        rev_parse_head(&self.repo())
    }

    fn source(&self) -> String {
        fs::read_to_string(self.repo().join("widget.go")).unwrap()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Get HEAD using git directly.
fn rev_parse_head(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .expect("git rev-parse failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

mod git_interface {
    use super::*;

    #[test]
    fn head_revision_matches_git() {
        let ws = TestWorkspace::new();
        let git = Git::open(&ws.git_dir()).unwrap();

        assert_eq!(git.head_revision().unwrap(), ws.second);
        assert_eq!(git.head_revision().unwrap().len(), 40);
    }

    #[test]
    fn open_does_not_search_parents() {
        let ws = TestWorkspace::new();
        let nested = ws.repo().join("internal");
        fs::create_dir_all(&nested).unwrap();

        let err = Git::open(&nested.join(".git")).unwrap_err();
        assert!(matches!(err, GitError::NotARepo { .. }));
    }

    #[test]
    fn unborn_head_is_reported() {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init"]);

        let git = Git::open(&dir.path().join(".git")).unwrap();
        assert!(matches!(
            git.head_revision(),
            Err(GitError::UnbornHead { .. })
        ));
    }

    #[test]
    fn hard_reset_moves_head_and_tree() {
        let ws = TestWorkspace::new();
        let git = Git::open(&ws.git_dir()).unwrap();

        git.reset_to(&ws.first, ResetMode::Hard).unwrap();

        assert_eq!(ws.head(), ws.first);
        assert_eq!(ws.source(), "package widget\n");
        assert!(!git.is_dirty().unwrap());
    }

    #[test]
    fn mixed_reset_keeps_tree() {
        let ws = TestWorkspace::new();
        let git = Git::open(&ws.git_dir()).unwrap();

        git.reset_to(&ws.first, ResetMode::Mixed).unwrap();

        assert_eq!(ws.head(), ws.first);
        assert_eq!(ws.source(), "package widget\n\nconst V = 2\n");
        assert!(git.is_dirty().unwrap());
    }

    #[test]
    fn unknown_revision_is_not_found() {
        let ws = TestWorkspace::new();
        let git = Git::open(&ws.git_dir()).unwrap();

        let err = git
            .reset_to("0000000000000000000000000000000000000000", ResetMode::Hard)
            .unwrap_err();

        assert!(matches!(err, GitError::RevisionNotFound { .. }));
        assert_eq!(ws.head(), ws.second);
    }

    #[test]
    fn untracked_files_are_not_local_changes() {
        let ws = TestWorkspace::new();
        let git = Git::open(&ws.git_dir()).unwrap();

        fs::write(ws.repo().join("notes.txt"), "scratch\n").unwrap();
        assert!(!git.is_dirty().unwrap());

        fs::write(ws.repo().join("widget.go"), "package widget // edited\n").unwrap();
        assert!(git.is_dirty().unwrap());
    }
}

mod source_control {
    use super::*;

    #[test]
    fn reports_head_and_resets() {
        let ws = TestWorkspace::new();
        let scm = GitSourceControl::new();

        assert_eq!(scm.head_revision(&ws.git_dir()).unwrap(), ws.second);
        scm.reset(&ws.git_dir(), &ws.first, ResetMode::Hard).unwrap();
        assert_eq!(scm.head_revision(&ws.git_dir()).unwrap(), ws.first);
    }

    #[test]
    fn short_revision_resolves() {
        let ws = TestWorkspace::new();
        let scm = GitSourceControl::new();

        scm.reset(&ws.git_dir(), &ws.first[..12], ResetMode::Hard)
            .unwrap();
        assert_eq!(ws.head(), ws.first);
    }

    #[test]
    fn missing_working_copy_is_git_error() {
        let ws = TestWorkspace::new();
        let scm = GitSourceControl::new();
        let missing = ws.dir.path().join("src/github.com/acme/missing/.git");

        let err = scm.head_revision(&missing).unwrap_err();
        assert!(matches!(err, BackendError::Git(GitError::NotARepo { .. })));
    }
}

mod pinning {
    use super::*;

    fn run_install(ws: &TestWorkspace, toolchain: &MockBackend, text: &str) -> String {
        let workspace = ws.workspace();
        let scm = GitSourceControl::new();
        let installer = Installer::new(
            Fetcher::new(
                toolchain,
                &scm,
                &workspace,
                ResetMode::Hard,
                Verbosity::Quiet,
            ),
            RevisionInspector::new(&scm, &workspace),
            false,
            Verbosity::Quiet,
        );

        let mut out = Vec::new();
        installer
            .run(&Manifest::parse(text).unwrap(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn install_reverts_then_is_idempotent() {
        let ws = TestWorkspace::new();
        let toolchain = MockBackend::new();
        let text = format!("{}/cmd #{}\n", IMPORT_PATH, ws.first);

        let out = run_install(&ws, &toolchain, &text);
        assert_eq!(out, format!("{}/cmd (revert: {})\n", IMPORT_PATH, ws.first));
        assert_eq!(ws.head(), ws.first);
        assert_eq!(ws.source(), "package widget\n");

        let out = run_install(&ws, &toolchain, &text);
        assert!(out.is_empty());
        assert_eq!(ws.head(), ws.first);
    }

    #[test]
    fn install_discards_local_edits_under_hard_reset() {
        let ws = TestWorkspace::new();
        fs::write(ws.repo().join("widget.go"), "package widget // edited\n").unwrap();
        let toolchain = MockBackend::new();

        run_install(&ws, &toolchain, &format!("{} #{}\n", IMPORT_PATH, ws.first));

        assert_eq!(ws.source(), "package widget\n");
    }

    #[test]
    fn unresolvable_pin_is_revert_error() {
        let ws = TestWorkspace::new();
        let workspace = ws.workspace();
        let toolchain = MockBackend::new();
        let scm = GitSourceControl::new();
        let installer = Installer::new(
            Fetcher::new(
                &toolchain,
                &scm,
                &workspace,
                ResetMode::Hard,
                Verbosity::Quiet,
            ),
            RevisionInspector::new(&scm, &workspace),
            false,
            Verbosity::Quiet,
        );
        let manifest = Manifest::parse(&format!("{} #nosuchrev\n", IMPORT_PATH)).unwrap();

        let err = installer.run(&manifest, &mut Vec::new()).unwrap_err();

        match err {
            PinError::Revert { revision, .. } => assert_eq!(revision, "nosuchrev"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ws.head(), ws.second);
    }

    #[test]
    fn freeze_reports_checked_out_revision() {
        let ws = TestWorkspace::new();
        let workspace = ws.workspace();
        let scm = GitSourceControl::new();
        let toolchain = MockBackend::new().with_deps_output(format!(
            "[fmt {}/encoding os]\n",
            IMPORT_PATH
        ));
        let prefixes = vec!["github.com".to_string()];
        let discoverer = Discoverer::new(
            &toolchain,
            RevisionInspector::new(&scm, &workspace),
            &prefixes,
            Verbosity::Quiet,
        );

        let pkgs = discoverer.discover(&[PathBuf::from("main.go")]).unwrap();

        assert_eq!(pkgs.len(), 1);
        assert_eq!(
            pkgs[0].import_path(),
            &ImportPath::new(format!("{}/encoding", IMPORT_PATH)).unwrap()
        );
        assert_eq!(pkgs[0].pinned_revision(), Some(ws.second.as_str()));
    }
}
