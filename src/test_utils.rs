//! Test utilities shared across modules.
//!
//! Fakes for the collaborators the storage layer depends on, plus a helper
//! that creates a throwaway git repository.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GgError, Result};
use crate::git::RepositoryResolver;
use crate::output::Reporter;

/// Resolver that always reports the same repository root.
///
/// The root can be switched mid-test to simulate running from another clone.
pub struct FixedRepository {
    root: RefCell<Option<PathBuf>>,
}

impl FixedRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: RefCell::new(Some(root.into())),
        }
    }

    /// Resolver that behaves like running outside any working tree.
    pub fn outside() -> Self {
        Self {
            root: RefCell::new(None),
        }
    }

    pub fn switch_to(&self, root: impl Into<PathBuf>) {
        *self.root.borrow_mut() = Some(root.into());
    }
}

impl RepositoryResolver for FixedRepository {
    fn repository_root(&self) -> Result<PathBuf> {
        self.root.borrow().clone().ok_or_else(|| {
            GgError::NotARepository("fatal: not a git repository".to_string())
        })
    }
}

/// Reporter that remembers what it was told.
#[derive(Default)]
pub struct RecordingReporter {
    pub warnings: RefCell<Vec<String>>,
    pub errors: RefCell<Vec<String>>,
    pub successes: RefCell<Vec<String>>,
    calls: Cell<usize>,
}

impl RecordingReporter {
    pub fn warning_count(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.get()
    }
}

impl Reporter for RecordingReporter {
    fn warn(&self, message: &str) {
        self.calls.set(self.calls.get() + 1);
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.calls.set(self.calls.get() + 1);
        self.errors.borrow_mut().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.calls.set(self.calls.get() + 1);
        self.successes.borrow_mut().push(message.to_string());
    }
}

fn git_in(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a git repository at `dir` with no commits; HEAD points at
/// the unborn `main`.
pub fn init_empty_git_repo(dir: &Path) {
    git_in(dir, &["init", "--quiet"]);
    git_in(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git_in(dir, &["config", "user.name", "gg tests"]);
    git_in(dir, &["config", "user.email", "gg@example.com"]);
    git_in(dir, &["config", "commit.gpgsign", "false"]);
}

/// Initialize a git repository at `dir` with one commit on `main`.
pub fn init_git_repo(dir: &Path) {
    init_empty_git_repo(dir);
    std::fs::write(dir.join("README.md"), "hello\n").unwrap();
    git_in(dir, &["add", "README.md"]);
    git_in(dir, &["commit", "--quiet", "-m", "initial"]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_repository_switch() {
        let repo = FixedRepository::new("/a");
        assert_eq!(repo.repository_root().unwrap(), PathBuf::from("/a"));
        repo.switch_to("/b");
        assert_eq!(repo.repository_root().unwrap(), PathBuf::from("/b"));
    }

    #[test]
    fn test_outside_is_not_a_repository() {
        let err = FixedRepository::outside().repository_root().unwrap_err();
        assert!(matches!(err, GgError::NotARepository(_)));
    }

    #[test]
    fn test_recording_reporter_counts() {
        let reporter = RecordingReporter::default();
        reporter.warn("a");
        reporter.success("b");
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.total_calls(), 2);
    }
}
